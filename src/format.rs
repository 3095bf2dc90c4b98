//! Output formatters.
//!
//! Render a [`DetectionResult`] into one of the supported text formats.
//! Every format is line-oriented and ends with a trailing newline, so the
//! output can be written to a file or piped as-is.

use std::fmt::Write;

use crate::error::CutscanError;
use crate::scene::DetectionResult;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON: `{"scenes": [...], "metadata": {...}}`.
    #[default]
    Json,
    /// `frame,timestamp,timecode` header plus one row per cut.
    Csv,
    /// Aegisub keyframe list: format header, fps line, one frame number per
    /// line.
    Aegisub,
    /// One `HH:MM:SS.mmm` timecode per line.
    Timecode,
}

impl OutputFormat {
    /// Parse a format name as accepted by the CLI's `--format` option.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            "aegisub" => Some(OutputFormat::Aegisub),
            "timecode" | "timecodes" => Some(OutputFormat::Timecode),
            _ => None,
        }
    }
}

/// Render a detection result in the requested format.
///
/// # Example
///
/// ```no_run
/// use cutscan::{detect, render, CutscanError, DetectOptions, OutputFormat};
///
/// let result = detect("input.mp4", &DetectOptions::new())?;
/// print!("{}", render(&result, OutputFormat::Csv)?);
/// # Ok::<(), CutscanError>(())
/// ```
pub fn render(result: &DetectionResult, format: OutputFormat) -> Result<String, CutscanError> {
    match format {
        OutputFormat::Json => {
            let mut output = serde_json::to_string_pretty(result)?;
            output.push('\n');
            Ok(output)
        }
        OutputFormat::Csv => {
            let mut output = String::from("frame,timestamp,timecode\n");
            for scene in &result.scenes {
                let _ = writeln!(
                    output,
                    "{},{:.6},{}",
                    scene.frame_number, scene.timestamp, scene.timecode,
                );
            }
            Ok(output)
        }
        OutputFormat::Aegisub => {
            let mut output = String::from("# keyframe format v1\n");
            let _ = writeln!(output, "fps {}", result.metadata.frames_per_second);
            for scene in &result.scenes {
                let _ = writeln!(output, "{}", scene.frame_number);
            }
            Ok(output)
        }
        OutputFormat::Timecode => {
            let mut output = String::new();
            for scene in &result.scenes {
                let _ = writeln!(output, "{}", scene.timecode);
            }
            Ok(output)
        }
    }
}
