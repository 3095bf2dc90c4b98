//! Video decoding to grayscale planes.
//!
//! [`VideoSource`] opens a media file with FFmpeg, selects the best video
//! stream, and feeds every frame — decoded and converted to 8-bit grayscale —
//! to a push callback in strict decode order. The detector consumes exactly
//! this contract: a lazy, in-order sequence of [`RawFrame`] records.
//!
//! # Example
//!
//! ```no_run
//! use cutscan::{CutscanError, VideoSource};
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! println!("{} frames expected", source.metadata().frame_count);
//!
//! source.for_each_frame(|frame| {
//!     println!("frame {} at {:.3}s", frame.frame_number, frame.pts_seconds);
//!     Ok(())
//! })?;
//! # Ok::<(), CutscanError>(())
//! ```

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    format::{context::Input, Pixel},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
    Rational,
};

use crate::error::CutscanError;
use crate::metadata::VideoMetadata;

/// One decoded grayscale frame, borrowed for the duration of a callback.
///
/// `data` holds `width * height` bytes, row-major, one byte per pixel
/// (stride equals `width`). Frames arrive with strictly increasing
/// `frame_number`, step 1.
#[derive(Debug)]
pub struct RawFrame<'a> {
    /// Tightly packed luma plane.
    pub data: &'a [u8],
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts_seconds: f64,
    /// 0-indexed decode-order frame number.
    pub frame_number: u64,
}

/// FFmpeg internal log verbosity level.
///
/// FFmpeg has its own logging system, separate from the Rust
/// [`log`](https://crates.io/crates/log) crate, and prints warnings to
/// stderr by default. This enum covers the levels the CLI tunes; it does not
/// affect Rust-side `log` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderLogLevel {
    /// Print nothing at all.
    Quiet,
    /// Only unrecoverable errors.
    Fatal,
    /// Recoverable errors too.
    Error,
    /// Warnings (FFmpeg's default).
    Warning,
    /// Informational messages.
    Info,
    /// Debugging output.
    Debug,
}

/// Set how much FFmpeg itself prints to stderr.
pub fn set_decoder_log_level(level: DecoderLogLevel) {
    use ffmpeg_next::util::log::Level;

    let level = match level {
        DecoderLogLevel::Quiet => Level::Quiet,
        DecoderLogLevel::Fatal => Level::Fatal,
        DecoderLogLevel::Error => Level::Error,
        DecoderLogLevel::Warning => Level::Warning,
        DecoderLogLevel::Info => Level::Info,
        DecoderLogLevel::Debug => Level::Debug,
    };
    ffmpeg_next::util::log::set_level(level);
}

/// Rescale a PTS value from the stream time base to seconds.
fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}

/// A video file opened for sequential grayscale decoding.
///
/// Created via [`VideoSource::open`]. Metadata is extracted once at open
/// time and cached.
pub struct VideoSource {
    input_context: Input,
    metadata: VideoMetadata,
    video_stream_index: usize,
    time_base: Rational,
    file_path: PathBuf,
}

impl VideoSource {
    /// Open a video file for detection.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream, and caches its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`CutscanError::FileOpen`] if the file cannot be opened and
    /// [`CutscanError::NoVideoStream`] if it has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CutscanError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init().map_err(|error| CutscanError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| CutscanError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(CutscanError::NoVideoStream)?;
        let video_stream_index = stream.index();
        let time_base = stream.time_base();

        let duration_microseconds = input_context.duration();
        let duration_seconds = if duration_microseconds > 0 {
            duration_microseconds as f64 / 1_000_000.0
        } else {
            0.0
        };

        let codec_parameters = stream.parameters();
        let decoder_context =
            CodecContext::from_parameters(codec_parameters).map_err(|error| {
                CutscanError::FileOpen {
                    path: file_path.clone(),
                    reason: format!("Failed to read video codec parameters: {error}"),
                }
            })?;
        let video_decoder =
            decoder_context
                .decoder()
                .video()
                .map_err(|error| CutscanError::FileOpen {
                    path: file_path.clone(),
                    reason: format!("Failed to create video decoder: {error}"),
                })?;

        // Average frame rate, falling back to the raw stream rate.
        let frame_rate = stream.avg_frame_rate();
        let frames_per_second = if frame_rate.denominator() != 0 {
            frame_rate.numerator() as f64 / frame_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        let frame_count = if frames_per_second > 0.0 {
            (duration_seconds * frames_per_second) as u64
        } else {
            0
        };

        let codec = video_decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: video_decoder.width(),
            height: video_decoder.height(),
            frames_per_second,
            frame_count,
            duration_seconds,
            codec,
        };

        log::info!(
            "Opened {}: {}x{} @ {:.3} fps, ~{} frames [{}]",
            file_path.display(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.frame_count,
            metadata.codec,
        );

        Ok(Self {
            input_context,
            metadata,
            video_stream_index,
            time_base,
            file_path,
        })
    }

    /// Metadata of the selected video stream.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Decode every frame in order, converting each to grayscale and passing
    /// it to `callback`. Returns after the decoder has been flushed or the
    /// callback returns an error.
    ///
    /// The grayscale buffer is owned by the source and reused across frames;
    /// the callback must not retain the borrowed [`RawFrame`] data.
    pub fn for_each_frame<F>(&mut self, mut callback: F) -> Result<(), CutscanError>
    where
        F: FnMut(&RawFrame<'_>) -> Result<(), CutscanError>,
    {
        let stream = self
            .input_context
            .stream(self.video_stream_index)
            .ok_or(CutscanError::NoVideoStream)?;
        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let mut decoder = decoder_context.decoder().video()?;

        // The scaler is created lazily from the first decoded frame: the
        // decoder's reported format before decoding may differ from the real
        // output, and both format and dimensions may change mid-stream.
        let mut scaler: Option<ScalingContext> = None;
        let mut scaler_input: Option<(Pixel, u32, u32)> = None;

        let mut decoded_frame = VideoFrame::empty();
        let mut gray_frame = VideoFrame::empty();
        let mut plane_buffer: Vec<u8> = Vec::new();
        let mut frame_number: u64 = 0;

        let time_base = self.time_base;
        let fps = self.metadata.frames_per_second;

        let mut deliver = |decoded: &VideoFrame,
                           gray: &mut VideoFrame,
                           scaler: &mut Option<ScalingContext>,
                           scaler_input: &mut Option<(Pixel, u32, u32)>,
                           frame_number: &mut u64,
                           plane_buffer: &mut Vec<u8>|
         -> Result<(), CutscanError> {
            let width = decoded.width();
            let height = decoded.height();
            let format = decoded.format();

            let key = (format, width, height);
            if scaler.is_none() || *scaler_input != Some(key) {
                *scaler_input = Some(key);
                *scaler = Some(ScalingContext::get(
                    format,
                    width,
                    height,
                    Pixel::GRAY8,
                    width,
                    height,
                    ScalingFlags::BILINEAR,
                )?);
            }
            let context = scaler.as_mut().ok_or_else(|| {
                CutscanError::VideoDecodeError("grayscale scaler unavailable".to_string())
            })?;
            context.run(decoded, gray)?;

            let pts_seconds = decoded
                .pts()
                .map(|pts| pts_to_seconds(pts, time_base))
                .unwrap_or_else(|| {
                    if fps > 0.0 {
                        *frame_number as f64 / fps
                    } else {
                        0.0
                    }
                });

            let stride = gray.stride(0);
            let row_len = width as usize;
            let data = gray.data(0);

            let frame = if stride == row_len {
                RawFrame {
                    data: &data[..row_len * height as usize],
                    width,
                    height,
                    pts_seconds,
                    frame_number: *frame_number,
                }
            } else {
                plane_buffer.clear();
                plane_buffer.reserve(row_len * height as usize);
                for row in 0..height as usize {
                    let start = row * stride;
                    plane_buffer.extend_from_slice(&data[start..start + row_len]);
                }
                RawFrame {
                    data: &plane_buffer[..],
                    width,
                    height,
                    pts_seconds,
                    frame_number: *frame_number,
                }
            };

            *frame_number += 1;
            callback(&frame)
        };

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != self.video_stream_index {
                continue;
            }

            decoder
                .send_packet(&packet)
                .map_err(|e| CutscanError::VideoDecodeError(e.to_string()))?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                deliver(
                    &decoded_frame,
                    &mut gray_frame,
                    &mut scaler,
                    &mut scaler_input,
                    &mut frame_number,
                    &mut plane_buffer,
                )?;
            }
        }

        // Flush the decoder.
        let _ = decoder.send_eof();
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            deliver(
                &decoded_frame,
                &mut gray_frame,
                &mut scaler,
                &mut scaler_input,
                &mut frame_number,
                &mut plane_buffer,
            )?;
        }

        log::debug!("Decoded {frame_number} frame(s) from {}", self.file_path.display());

        Ok(())
    }
}
