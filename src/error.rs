//! Error types for the `cutscan` crate.
//!
//! This module defines [`CutscanError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry enough context to
//! diagnose the problem without additional logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// The unified error type for all `cutscan` operations.
///
/// Every public method that can fail returns `Result<T, CutscanError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CutscanError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// A decoded frame failed validation before analysis.
    ///
    /// Raised for zero or oversized dimensions and for planes shorter than
    /// `width * height` bytes. Detection aborts on this error.
    #[error("Invalid frame {frame_number}: {reason}")]
    InvalidFrame {
        /// The 0-indexed number of the offending frame.
        frame_number: u64,
        /// What was wrong with it.
        reason: String,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// Result serialization to JSON failed.
    #[error("JSON encoding error: {0}")]
    JsonEncode(#[from] serde_json::Error),

    /// The operation was cancelled via a
    /// [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<FfmpegError> for CutscanError {
    fn from(error: FfmpegError) -> Self {
        CutscanError::FfmpegError(error.to_string())
    }
}
