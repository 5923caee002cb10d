//! Error types for the batch-watermark crate.

use std::path::PathBuf;

/// Errors that can occur while preparing or running a watermark batch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path does not exist or is not a directory.
    #[error("{} is not an existing directory", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The input directory could not be listed.
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        /// Directory that was being listed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The input directory holds no `.png`, `.jpg` or `.jpeg` files.
    #[error("no image files found in {}", .0.display())]
    NoImages(PathBuf),

    /// The external annotator could not be started or waited on.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Executable that was invoked.
        program: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
