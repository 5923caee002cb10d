//! Locating candidate images and deriving the output directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

/// Suffix appended to the input directory name to form the output directory.
pub const OUTPUT_DIR_SUFFIX: &str = "_watermarked";

/// File name endings (lowercase) that mark a candidate image.
const IMAGE_SUFFIXES: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Check whether a file name marks a supported image.
///
/// The comparison is case-insensitive, so `b.JPG` and `c.Jpeg` both match.
#[must_use]
pub fn is_candidate_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// Ensure `dir` exists and is a directory.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] otherwise.
pub fn validate_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::DirectoryNotFound(dir.to_path_buf()))
    }
}

/// Derive the output directory for an input directory.
///
/// `photos` becomes `photos_watermarked`, next to the input. A trailing
/// separator is ignored. Paths without a final component (`.`, `..`) are
/// canonicalized first so the output still lands beside the real directory.
#[must_use]
pub fn output_dir_for(input_dir: &Path) -> PathBuf {
    if let Some(path) = suffixed(input_dir) {
        return path;
    }

    if let Some(path) = input_dir
        .canonicalize()
        .ok()
        .and_then(|canonical| suffixed(&canonical))
    {
        return path;
    }

    let mut raw = input_dir.as_os_str().to_os_string();
    raw.push(OUTPUT_DIR_SUFFIX);
    PathBuf::from(raw)
}

fn suffixed(dir: &Path) -> Option<PathBuf> {
    let name = dir.file_name()?;
    let mut renamed = OsString::from(name);
    renamed.push(OUTPUT_DIR_SUFFIX);
    Some(dir.with_file_name(renamed))
}

/// List the candidate images directly inside `dir`.
///
/// Subdirectories are not traversed and non-file entries are ignored.
/// Symlinks count when they resolve to a regular file.
/// The order is whatever the directory listing yields.
///
/// # Errors
///
/// Returns [`Error::ReadDir`] if the directory cannot be listed and
/// [`Error::NoImages`] if nothing matches.
pub fn find_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", dir.display());
                None
            }
        })
        .filter(|e| is_candidate_name(&e.file_name().to_string_lossy()))
        .map(|e| e.path())
        .filter(|path| std::fs::metadata(path).is_ok_and(|m| m.is_file()))
        .collect();

    if files.is_empty() {
        return Err(Error::NoImages(dir.to_path_buf()));
    }

    Ok(files)
}
