//! Progress reporting and cancellation support.
//!
//! This module provides [`ProgressCallback`] for monitoring a detection run,
//! [`CancellationToken`] for cooperative cancellation, and [`ProgressInfo`]
//! for detailed progress snapshots.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cutscan::{detect, CutscanError, DetectOptions, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("frame {}: {pct:.1}% complete", info.current_frame);
//!         }
//!     }
//! }
//!
//! let options = DetectOptions::new().with_progress(Arc::new(PrintProgress));
//! let result = detect("input.mp4", &options)?;
//! # Ok::<(), CutscanError>(())
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

/// A snapshot of detection progress.
///
/// Delivered to [`ProgressCallback::on_progress`] at a cadence controlled by
/// [`DetectOptions::with_batch_size`](crate::DetectOptions::with_batch_size).
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// The frame number most recently processed.
    pub current_frame: u64,
    /// Total frames expected, if known ahead of time.
    pub total_frames: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total_frames` is known.
    pub percentage: Option<f32>,
    /// Timestamp of the current frame, in seconds.
    pub timestamp: f64,
    /// Wall-clock time elapsed since detection started.
    pub elapsed: Duration,
    /// Estimated time remaining, based on current throughput.
    pub estimated_remaining: Option<Duration>,
}

/// Trait for receiving progress updates during detection.
///
/// Implementations must be [`Send`] and [`Sync`]; the callback object is
/// shared behind an [`Arc`].
///
/// Progress callbacks are **infallible** — they observe but cannot halt the
/// run. Use [`CancellationToken`] for cooperative cancellation.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals while frames are being processed.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Cooperative cancellation token backed by an [`AtomicBool`].
///
/// Clone this token and share it between threads; call
/// [`cancel`](CancellationToken::cancel) from any thread to request
/// cancellation. The detection loop checks
/// [`is_cancelled`](CancellationToken::is_cancelled) before each frame and
/// returns [`CutscanError::Cancelled`](crate::CutscanError::Cancelled).
///
/// # Example
///
/// ```
/// use cutscan::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// // From another thread (or a signal handler, etc.):
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation.
    ///
    /// All clones of this token will observe the cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal helper that tracks progress timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    total_frames: Option<u64>,
    processed: u64,
    batch_size: u64,
    start_time: Instant,
    frames_since_last_report: u64,
    last_timestamp: f64,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        total_frames: Option<u64>,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            total_frames,
            processed: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            frames_since_last_report: 0,
            last_timestamp: 0.0,
        }
    }

    /// Record one processed frame and fire the callback if the batch
    /// threshold is reached.
    pub(crate) fn advance(&mut self, frame_number: u64, timestamp: f64) {
        self.processed += 1;
        self.frames_since_last_report += 1;
        self.last_timestamp = timestamp;

        if self.frames_since_last_report >= self.batch_size {
            self.report(frame_number, timestamp);
            self.frames_since_last_report = 0;
        }
    }

    /// Unconditionally emit a final progress report.
    pub(crate) fn finish(&mut self) {
        if self.processed > 0 {
            self.report(self.processed - 1, self.last_timestamp);
        }
    }

    fn report(&self, frame_number: u64, timestamp: f64) {
        let elapsed = self.start_time.elapsed();

        let percentage = self
            .total_frames
            .filter(|&t| t > 0)
            .map(|t| (self.processed as f32 / t as f32) * 100.0);

        let estimated_remaining = if self.processed > 0 {
            self.total_frames.map(|t| {
                let remaining = t.saturating_sub(self.processed);
                let per_frame = elapsed / self.processed as u32;
                per_frame * remaining as u32
            })
        } else {
            None
        };

        let info = ProgressInfo {
            current_frame: frame_number,
            total_frames: self.total_frames,
            percentage,
            timestamp,
            elapsed,
            estimated_remaining,
        };

        self.callback.on_progress(&info);
    }
}
