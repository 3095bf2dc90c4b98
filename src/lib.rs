//! # cutscan
//!
//! Scene-change detection for video files.
//!
//! `cutscan` decodes a video to grayscale frames (via
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)) and finds shot
//! boundaries with a block-based motion-estimation analysis: each 16x16
//! macroblock of a frame is motion-searched against the previous frame, and
//! a frame whose blocks are mostly better explained by their own content
//! than by any motion-compensated prediction starts a new scene.
//!
//! The detector is deterministic — identical input and options always yield
//! a byte-identical cut list — and allocation-free in its per-frame hot
//! path: two padded plane buffers and one macroblock array are allocated at
//! the first frame and reused.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cutscan::{detect, DetectOptions, Sensitivity};
//!
//! let options = DetectOptions::new().with_sensitivity(Sensitivity::Medium);
//! let result = detect("input.mp4", &options).unwrap();
//!
//! for scene in &result.scenes {
//!     println!("cut at frame {} ({})", scene.frame_number, scene.timecode);
//! }
//! ```
//!
//! ## Driving the detector directly
//!
//! The detector itself is decoder-agnostic: anything that produces in-order
//! grayscale [`RawFrame`] records can feed it.
//!
//! ```
//! use cutscan::{DetectOptions, RawFrame, SceneDetector};
//!
//! let mut detector = SceneDetector::new(&DetectOptions::new());
//! let plane = vec![0u8; 64 * 48];
//! let frame = RawFrame {
//!     data: &plane,
//!     width: 64,
//!     height: 48,
//!     pts_seconds: 0.0,
//!     frame_number: 0,
//! };
//!
//! // The first frame always starts a scene.
//! let cut = detector.process_frame(&frame).unwrap();
//! assert_eq!(cut.unwrap().frame_number, 0);
//! ```
//!
//! ## Output formats
//!
//! [`render`] serializes a [`DetectionResult`] as pretty JSON, CSV, an
//! Aegisub keyframe list, or plain timecodes — one cut per line.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system for the
//! decoding front-end (`ffmpeg-next`).

pub mod analysis;
pub mod block;
pub mod config;
pub mod decoder;
pub mod detector;
pub mod error;
pub mod format;
pub mod metadata;
pub mod motion;
pub mod plane;
pub mod progress;
pub mod scene;

pub use config::{DetectOptions, Sensitivity};
pub use decoder::{set_decoder_log_level, DecoderLogLevel, RawFrame, VideoSource};
pub use detector::{detect, SceneDetector};
pub use error::CutscanError;
pub use format::{render, OutputFormat};
pub use metadata::VideoMetadata;
pub use motion::{MotionVector, SearchRange};
pub use plane::{MBParam, PaddedPlane, EDGE};
pub use progress::{CancellationToken, ProgressCallback, ProgressInfo};
pub use scene::{format_timecode, DetectionResult, SceneCallback, SceneInfo};
