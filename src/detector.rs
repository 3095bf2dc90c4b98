//! Scene-change detection driver.
//!
//! [`SceneDetector`] holds the cross-frame state: two padded plane buffers
//! (swapped, never reallocated in steady state), the reusable macroblock
//! array, and the `intra_count` cooldown. Feed it frames in decode order via
//! [`process_frame`](SceneDetector::process_frame); it returns a
//! [`SceneInfo`] whenever a frame starts a new scene.
//!
//! [`detect`] is the file-in, cuts-out convenience entry point: it opens a
//! [`VideoSource`], drives the detector over every decoded frame, and
//! assembles a [`DetectionResult`].
//!
//! # Example
//!
//! ```no_run
//! use cutscan::{detect, CutscanError, DetectOptions, Sensitivity};
//!
//! let options = DetectOptions::new().with_sensitivity(Sensitivity::Medium);
//! let result = detect("input.mp4", &options)?;
//! for scene in &result.scenes {
//!     println!("{} {}", scene.frame_number, scene.timecode);
//! }
//! # Ok::<(), CutscanError>(())
//! ```

use std::mem;
use std::path::Path;

use crate::analysis::{analyze_frame, Macroblock};
use crate::config::DetectOptions;
use crate::decoder::{RawFrame, VideoSource};
use crate::error::CutscanError;
use crate::motion::SearchRange;
use crate::plane::{MBParam, PaddedPlane};
use crate::progress::ProgressTracker;
use crate::scene::{DetectionResult, SceneInfo};

/// Largest accepted frame dimension, in pixels.
const MAX_DIMENSION: u32 = 8192;

/// Per-resolution working state: geometry, plane buffers, macroblock array.
struct Buffers {
    param: MBParam,
    fcode: u8,
    previous: PaddedPlane,
    current: PaddedPlane,
    macroblocks: Vec<Macroblock>,
    /// False until `previous` holds a frame of the current resolution.
    has_reference: bool,
}

impl Buffers {
    fn new(width: u32, height: u32, search_range: SearchRange) -> Self {
        let param = MBParam::new(width as usize, height as usize);
        Self {
            param,
            fcode: search_range.fcode(width, height),
            previous: PaddedPlane::new(&param),
            current: PaddedPlane::new(&param),
            macroblocks: vec![Macroblock::default(); param.mb_count()],
            has_reference: false,
        }
    }
}

/// Stateful scene-change detector over an in-order frame sequence.
///
/// The detector is resolution-agnostic until the first frame arrives; a
/// mid-stream resolution change reallocates the buffers and re-bootstraps,
/// recording the first frame at the new resolution as a cut.
pub struct SceneDetector {
    intra_thresh: u32,
    intra_thresh2: u32,
    search_range: SearchRange,
    buffers: Option<Buffers>,
    /// Frames since the last cut; reset to 1 on every cut and at startup.
    intra_count: u32,
}

impl SceneDetector {
    /// Create a detector configured from `options`.
    ///
    /// Only the threshold and search-range settings are consumed here;
    /// progress, cancellation, and callbacks are the concern of [`detect`].
    pub fn new(options: &DetectOptions) -> Self {
        let (intra_thresh, intra_thresh2) = options.resolved_thresholds();
        Self {
            intra_thresh,
            intra_thresh2,
            search_range: options.search_range,
            buffers: None,
            intra_count: 1,
        }
    }

    /// Frames since the last emitted cut.
    pub fn intra_count(&self) -> u32 {
        self.intra_count
    }

    /// Process one frame, returning a [`SceneInfo`] if it starts a new scene.
    ///
    /// The first frame ever seen — and the first frame after a resolution
    /// change — is a scene start by convention: there is no reference frame
    /// to compare against, so no verdict runs for it.
    ///
    /// # Errors
    ///
    /// Returns [`CutscanError::InvalidFrame`] for zero or oversized
    /// dimensions, or a plane shorter than `width * height` bytes.
    pub fn process_frame(&mut self, frame: &RawFrame<'_>) -> Result<Option<SceneInfo>, CutscanError> {
        let width = frame.width;
        let height = frame.height;

        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CutscanError::InvalidFrame {
                frame_number: frame.frame_number,
                reason: format!("unsupported dimensions {width}x{height}"),
            });
        }

        let plane_len = width as usize * height as usize;
        if frame.data.len() < plane_len {
            return Err(CutscanError::InvalidFrame {
                frame_number: frame.frame_number,
                reason: format!(
                    "plane too short: {} bytes for {width}x{height}",
                    frame.data.len()
                ),
            });
        }

        let reallocate = match &self.buffers {
            Some(buffers) => {
                buffers.param.width != width as usize || buffers.param.height != height as usize
            }
            None => true,
        };
        if reallocate && self.buffers.take().is_some() {
            log::warn!(
                "Resolution change to {width}x{height} at frame {}; restarting detection state",
                frame.frame_number,
            );
        }

        let search_range = self.search_range;
        let buffers = self
            .buffers
            .get_or_insert_with(|| Buffers::new(width, height, search_range));

        buffers.current.load(&frame.data[..plane_len], &buffers.param);

        let cut = if buffers.has_reference {
            let stats = analyze_frame(
                &buffers.previous,
                &buffers.current,
                &buffers.param,
                buffers.fcode,
                &mut buffers.macroblocks,
            );

            if scene_change_verdict(
                stats.intra_blocks,
                buffers.param.mb_count() as u32,
                self.intra_thresh,
                self.intra_thresh2,
                self.intra_count,
            ) {
                self.intra_count = 1;
                Some(SceneInfo::new(frame.frame_number, frame.pts_seconds))
            } else {
                self.intra_count += 1;
                None
            }
        } else {
            // Bootstrap: this frame starts a scene by convention.
            buffers.has_reference = true;
            self.intra_count = 1;
            Some(SceneInfo::new(frame.frame_number, frame.pts_seconds))
        };

        mem::swap(&mut buffers.previous, &mut buffers.current);

        Ok(cut)
    }
}

/// The frame-level cut decision.
///
/// A frame starts a new scene when the intra-block density, scaled by the
/// `intra_count` cooldown, clears the threshold ratio:
/// `intra_blocks * T1 * intra_count > mb_count * T2`, and at least two
/// frames have passed since the previous cut.
fn scene_change_verdict(
    intra_blocks: u32,
    mb_count: u32,
    intra_thresh: u32,
    intra_thresh2: u32,
    intra_count: u32,
) -> bool {
    intra_count >= 2
        && intra_blocks as u64 * intra_thresh as u64 * intra_count as u64
            > mb_count as u64 * intra_thresh2 as u64
}

/// Detect scene changes in a video file.
///
/// Opens `path`, decodes every frame to grayscale, and runs the detector
/// over the sequence. The returned scene list starts with frame 0 and is
/// strictly increasing; the embedded metadata carries the exact decoded
/// frame count.
///
/// # Errors
///
/// Any open, decode, or validation failure aborts the call. If a
/// cancellation token was supplied and fires, the call returns
/// [`CutscanError::Cancelled`].
pub fn detect<P: AsRef<Path>>(
    path: P,
    options: &DetectOptions,
) -> Result<DetectionResult, CutscanError> {
    let mut source = VideoSource::open(path)?;
    let mut metadata = source.metadata().clone();

    let mut detector = SceneDetector::new(options);
    let mut scenes: Vec<SceneInfo> = Vec::new();
    let mut tracker = ProgressTracker::new(
        options.progress.clone(),
        Some(metadata.frame_count).filter(|&count| count > 0),
        options.batch_size,
    );
    let mut decoded_frames: u64 = 0;

    source.for_each_frame(|frame| {
        if let Some(token) = &options.cancellation {
            if token.is_cancelled() {
                return Err(CutscanError::Cancelled);
            }
        }

        if let Some(scene) = detector.process_frame(frame)? {
            log::debug!(
                "Scene change at frame {} ({})",
                scene.frame_number,
                scene.timecode,
            );
            if let Some(callback) = &options.scene_callback {
                callback.on_scene(&scene);
            }
            scenes.push(scene);
        }

        decoded_frames += 1;
        tracker.advance(frame.frame_number, frame.pts_seconds);
        Ok(())
    })?;

    tracker.finish();

    if decoded_frames > 0 {
        metadata.frame_count = decoded_frames;
    }

    if let Some(min_consecutive) = options.temporal_smoothing {
        smooth_scenes(&mut scenes, min_consecutive);
    }

    log::info!(
        "Detected {} scene(s) across {} frame(s)",
        scenes.len(),
        decoded_frames,
    );

    Ok(DetectionResult { scenes, metadata })
}

/// Drop cuts that follow the previous surviving cut by fewer than
/// `min_consecutive` frames. The first cut always survives.
fn smooth_scenes(scenes: &mut Vec<SceneInfo>, min_consecutive: u32) {
    let mut last_kept: Option<u64> = None;
    scenes.retain(|scene| match last_kept {
        None => {
            last_kept = Some(scene.frame_number);
            true
        }
        Some(previous) if scene.frame_number - previous >= min_consecutive as u64 => {
            last_kept = Some(scene.frame_number);
            true
        }
        Some(_) => false,
    });
}
