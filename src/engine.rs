//! Core batch engine: discover images, then watermark them one by one.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::annotate::{Annotator, ConvertAnnotator, WatermarkStyle};
use crate::discovery;
use crate::error::Result;

/// What happened to a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The annotator exited successfully and the output was written.
    Watermarked,
    /// The annotator ran but reported failure.
    Failed {
        /// Exit code, `None` if the annotator was killed by a signal.
        exit_code: Option<i32>,
        /// What the annotator wrote to standard error.
        stderr: String,
    },
    /// The annotator could not be run at all.
    Error {
        /// Human-readable description of the fault.
        message: String,
    },
}

/// Result of processing a single image file.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Source image.
    pub path: PathBuf,
    /// Where the watermarked copy was (or would have been) written.
    pub output: PathBuf,
    /// Outcome of the annotator run.
    pub status: FileStatus,
}

impl ProcessResult {
    /// Whether the image was watermarked.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == FileStatus::Watermarked
    }
}

/// Summary of a whole batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Directory the watermarked copies were written to.
    pub output_dir: PathBuf,
    /// One entry per candidate image, in processing order.
    pub results: Vec<ProcessResult>,
}

impl BatchReport {
    /// Number of images watermarked successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success()).count()
    }

    /// Number of images that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Applies a watermark to every image in a directory.
///
/// Generic over the [`Annotator`] so the external tool can be swapped out;
/// [`WatermarkRunner::new`] uses ImageMagick's `convert` with the default
/// [`WatermarkStyle`].
pub struct WatermarkRunner<A = ConvertAnnotator> {
    annotator: A,
    style: WatermarkStyle,
}

impl WatermarkRunner {
    /// Runner backed by `convert` with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::with_annotator(ConvertAnnotator::default(), WatermarkStyle::default())
    }
}

impl Default for WatermarkRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Annotator> WatermarkRunner<A> {
    /// Runner using a specific annotator and style.
    pub fn with_annotator(annotator: A, style: WatermarkStyle) -> Self {
        Self { annotator, style }
    }

    /// The style applied to every image.
    #[must_use]
    pub fn style(&self) -> &WatermarkStyle {
        &self.style
    }

    /// The annotator used for every image.
    #[must_use]
    pub fn annotator(&self) -> &A {
        &self.annotator
    }

    /// Watermark one image into `output_dir`, keeping its file name.
    ///
    /// Never fails: every fault is captured in the returned
    /// [`ProcessResult`] and logged.
    #[must_use]
    pub fn process_file(&self, input: &Path, output_dir: &Path) -> ProcessResult {
        let name = input.file_name().map_or_else(
            || input.display().to_string(),
            |f| f.to_string_lossy().into_owned(),
        );
        let output = match input.file_name() {
            Some(file_name) => output_dir.join(file_name),
            None => output_dir.join(&name),
        };
        let source = std::path::absolute(input).unwrap_or_else(|e| {
            debug!("Could not make {} absolute, passing it as is: {e}", input.display());
            input.to_path_buf()
        });

        info!("Adding watermark to image: {name}");

        let status = match self.annotator.annotate(&source, &output, &self.style) {
            Ok(annotation) if annotation.success() => {
                info!("  Successfully completed: {}", output.display());
                FileStatus::Watermarked
            }
            Ok(annotation) => {
                let stderr = annotation.stderr.trim().to_string();
                match annotation.exit_code {
                    Some(code) => warn!("  Failed with error code: {code}"),
                    None => warn!("  Failed: annotator terminated by signal"),
                }
                if !stderr.is_empty() {
                    warn!("  Error: {stderr}");
                }
                FileStatus::Failed {
                    exit_code: annotation.exit_code,
                    stderr,
                }
            }
            Err(e) => {
                error!("Error adding watermark to image {name}: {e}");
                FileStatus::Error {
                    message: e.to_string(),
                }
            }
        };

        ProcessResult {
            path: input.to_path_buf(),
            output,
            status,
        }
    }

    /// Watermark every candidate image in `input_dir`.
    ///
    /// The output directory is `<input_dir>_watermarked`. It is created
    /// before discovery; failing to create it is logged and the per-file
    /// writes are left to fail on their own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`](crate::Error::DirectoryNotFound)
    /// before touching the filesystem if `input_dir` is not a directory,
    /// [`Error::ReadDir`](crate::Error::ReadDir) if it cannot be listed and
    /// [`Error::NoImages`](crate::Error::NoImages) if it holds no images.
    /// Per-file failures are never returned as errors.
    pub fn run(&self, input_dir: &Path) -> Result<BatchReport> {
        info!("Adding watermark to images in directory: {}", input_dir.display());
        discovery::validate_directory(input_dir)?;

        let output_dir = discovery::output_dir_for(input_dir);
        if let Err(e) = std::fs::create_dir_all(&output_dir) {
            warn!(
                "Could not create output directory {}: {e}",
                output_dir.display()
            );
        }

        let images = discovery::find_candidates(input_dir)?;
        info!("Found {} images", images.len());

        let results: Vec<ProcessResult> = images
            .iter()
            .map(|image| self.process_file(image, &output_dir))
            .collect();

        let report = BatchReport {
            output_dir,
            results,
        };

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Finished adding watermark to all images. Results saved in: {}",
            report.output_dir.display()
        );

        Ok(report)
    }
}
