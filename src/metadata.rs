//! Video metadata types.
//!
//! [`VideoMetadata`] is extracted once when a file is opened and cached for
//! the lifetime of the [`VideoSource`](crate::VideoSource). A copy of it is
//! embedded in every [`DetectionResult`](crate::DetectionResult).

use serde::Serialize;

/// Metadata for the analyzed video stream.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Total number of frames. Estimated from duration and frame rate at open
    /// time; replaced by the exact decoded count after a full detection run.
    pub frame_count: u64,
    /// Total duration in seconds.
    pub duration_seconds: f64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}
