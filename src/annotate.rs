//! External annotator invocation.
//!
//! The actual image work (decode, draw text, encode) is done by ImageMagick.
//! This module builds its argument vector from a [`WatermarkStyle`] and runs
//! it as a child process, one file at a time.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Text stamped onto every image.
pub const WATERMARK_TEXT: &str = "Gilad Maman 313154205 and Shlomo Landaho 315689497";

/// Default annotator executable.
pub const DEFAULT_PROGRAM: &str = "convert";

/// Appearance of the watermark, passed to the annotator as flags.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkStyle {
    /// Overlay text.
    pub text: String,
    /// Anchor for the text (`-gravity`).
    pub gravity: String,
    /// Font size in points (`-pointsize`).
    pub point_size: u32,
    /// Fill color, any ImageMagick color spec (`-fill`).
    pub fill: String,
    /// Text rotation in degrees (`-annotate`).
    pub angle: i32,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            text: WATERMARK_TEXT.to_string(),
            gravity: "Center".to_string(),
            point_size: 30,
            fill: "rgba(0,0,0,0.5)".to_string(),
            angle: 0,
        }
    }
}

impl WatermarkStyle {
    /// Build the annotator arguments for one image.
    ///
    /// The layout is `<input> -gravity G -pointsize P -fill F -annotate A TEXT <output>`.
    #[must_use]
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            input.as_os_str().to_os_string(),
            "-gravity".into(),
            self.gravity.clone().into(),
            "-pointsize".into(),
            self.point_size.to_string().into(),
            "-fill".into(),
            self.fill.clone().into(),
            "-annotate".into(),
            self.angle.to_string().into(),
            self.text.clone().into(),
            output.as_os_str().to_os_string(),
        ]
    }
}

/// Outcome of one annotator run that started and exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Exit code, or `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

impl Annotation {
    /// Whether the annotator reported success.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Something that can stamp a watermark onto a single image.
///
/// Implementations must finish all work (including any child process)
/// before returning.
pub trait Annotator {
    /// Watermark `input` into `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the annotator could not be run at all. A run that
    /// exits non-zero is reported through [`Annotation::exit_code`] instead.
    fn annotate(&self, input: &Path, output: &Path, style: &WatermarkStyle)
        -> Result<Annotation>;
}

/// Runs ImageMagick's `convert` (or a compatible program) as a child process.
#[derive(Debug, Clone)]
pub struct ConvertAnnotator {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl Default for ConvertAnnotator {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ConvertAnnotator {
    /// Use `program` as the annotator executable.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Insert fixed arguments before the per-image ones, e.g. `magick convert`.
    #[must_use]
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The executable this annotator launches.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }
}

impl Annotator for ConvertAnnotator {
    fn annotate(
        &self,
        input: &Path,
        output: &Path,
        style: &WatermarkStyle,
    ) -> Result<Annotation> {
        let args = style.args(input, output);
        debug!(program = ?self.program, ?args, "launching annotator");

        let out = Command::new(&self.program)
            .args(&self.leading_args)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        Ok(Annotation {
            exit_code: out.status.code(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_matches_fixed_watermark() {
        let style = WatermarkStyle::default();
        assert_eq!(style.text, WATERMARK_TEXT);
        assert_eq!(style.gravity, "Center");
        assert_eq!(style.point_size, 30);
        assert_eq!(style.fill, "rgba(0,0,0,0.5)");
        assert_eq!(style.angle, 0);
    }

    #[test]
    fn args_follow_convert_layout() {
        let args = WatermarkStyle::default().args(Path::new("/in/a.png"), Path::new("out/a.png"));
        let expected: Vec<OsString> = [
            "/in/a.png",
            "-gravity",
            "Center",
            "-pointsize",
            "30",
            "-fill",
            "rgba(0,0,0,0.5)",
            "-annotate",
            "0",
            WATERMARK_TEXT,
            "out/a.png",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn text_with_shell_metacharacters_stays_one_argument() {
        let style = WatermarkStyle {
            text: "$(rm -rf /); `x` | y".to_string(),
            ..WatermarkStyle::default()
        };
        let args = style.args(Path::new("a.png"), Path::new("b.png"));
        assert_eq!(args[9], OsString::from("$(rm -rf /); `x` | y"));
        assert_eq!(args.len(), 11);
    }

    #[test]
    fn annotation_success_requires_zero_exit() {
        let ok = Annotation {
            exit_code: Some(0),
            stderr: String::new(),
        };
        assert!(ok.success());

        let failed = Annotation {
            exit_code: Some(1),
            stderr: "boom".to_string(),
        };
        assert!(!failed.success());

        let killed = Annotation {
            exit_code: None,
            stderr: String::new(),
        };
        assert!(!killed.success());
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let annotator = ConvertAnnotator::new("batch-watermark-no-such-program");
        let err = annotator
            .annotate(
                Path::new("a.png"),
                Path::new("b.png"),
                &WatermarkStyle::default(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { ref program, .. } if program == "batch-watermark-no-such-program"));
    }
}
