//! Stamp a text watermark onto every image in a directory.
//!
//! The image work itself is delegated to ImageMagick: for each `.png`, `.jpg`
//! or `.jpeg` file directly inside the input directory, `convert` is run once
//! to draw the watermark text and write a copy into `<dir>_watermarked`.
//!
//! # Quick Start
//!
//! ```no_run
//! use batch_watermark::WatermarkRunner;
//!
//! let runner = WatermarkRunner::new();
//! let report = runner.run("photos".as_ref()).expect("batch failed to start");
//! println!(
//!     "{} watermarked, {} failed, saved in {}",
//!     report.succeeded(),
//!     report.failed(),
//!     report.output_dir.display()
//! );
//! ```
//!
//! # Custom annotators
//!
//! The external tool sits behind the [`Annotator`] trait, so another program
//! (or a test double) can be plugged in with
//! [`WatermarkRunner::with_annotator`].
//!
//! ```no_run
//! use batch_watermark::{ConvertAnnotator, WatermarkRunner, WatermarkStyle};
//!
//! let magick = ConvertAnnotator::new("magick");
//! let runner = WatermarkRunner::with_annotator(magick, WatermarkStyle::default());
//! runner.run("photos".as_ref()).unwrap();
//! ```

#![deny(missing_docs)]

pub mod annotate;
pub mod discovery;
mod engine;
pub mod error;

pub use annotate::{Annotation, Annotator, ConvertAnnotator, WatermarkStyle, WATERMARK_TEXT};
pub use discovery::{find_candidates, is_candidate_name, output_dir_for};
pub use engine::{BatchReport, FileStatus, ProcessResult, WatermarkRunner};
pub use error::{Error, Result};
