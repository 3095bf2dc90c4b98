//! Detection configuration.
//!
//! [`DetectOptions`] is a builder that threads sensitivity, search-range,
//! progress, cancellation, and callback settings through
//! [`detect`](crate::detect) without polluting every function signature.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cutscan::{CancellationToken, DetectOptions, Sensitivity, SearchRange};
//!
//! let token = CancellationToken::new();
//! let options = DetectOptions::new()
//!     .with_sensitivity(Sensitivity::High)
//!     .with_search_range(SearchRange::Medium)
//!     .with_cancellation(token.clone())
//!     .with_batch_size(16);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::motion::SearchRange;
use crate::progress::{CancellationToken, NoOpProgress, ProgressCallback};
use crate::scene::SceneCallback;

/// Detection sensitivity preset.
///
/// Each preset selects a pair of verdict thresholds `(T1, T2)`; higher
/// sensitivity lowers both, admitting weaker cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sensitivity {
    /// Only obvious hard cuts: `(3000, 150)`.
    Low,
    /// Balanced default: `(2000, 90)`.
    #[default]
    Medium,
    /// Weak cuts too: `(1000, 50)`.
    High,
}

impl Sensitivity {
    /// The `(intra_thresh, intra_thresh2)` pair for this preset.
    pub fn thresholds(self) -> (u32, u32) {
        match self {
            Sensitivity::Low => (3000, 150),
            Sensitivity::Medium => (2000, 90),
            Sensitivity::High => (1000, 50),
        }
    }
}

/// Configuration for a detection run.
///
/// All fields have sensible defaults — a default-constructed value behaves
/// like the CLI with no flags: medium sensitivity, automatic search range,
/// no callbacks, no smoothing.
#[derive(Clone)]
pub struct DetectOptions {
    pub(crate) sensitivity: Sensitivity,
    /// Direct `(T1, T2)` override; takes precedence over `sensitivity`.
    pub(crate) custom_thresholds: Option<(u32, u32)>,
    pub(crate) search_range: SearchRange,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// How often to fire the progress callback (every N frames).
    pub(crate) batch_size: u64,
    /// Cancellation token. `None` means never cancelled.
    pub(crate) cancellation: Option<CancellationToken>,
    /// Synchronous per-cut notification.
    pub(crate) scene_callback: Option<Arc<dyn SceneCallback>>,
    /// Minimum frame spacing enforced by the smoothing post-filter.
    pub(crate) temporal_smoothing: Option<u32>,
}

impl Debug for DetectOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DetectOptions")
            .field("sensitivity", &self.sensitivity)
            .field("custom_thresholds", &self.custom_thresholds)
            .field("search_range", &self.search_range)
            .field("batch_size", &self.batch_size)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("has_scene_callback", &self.scene_callback.is_some())
            .field("temporal_smoothing", &self.temporal_smoothing)
            .finish()
    }
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectOptions {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self {
            sensitivity: Sensitivity::default(),
            custom_thresholds: None,
            search_range: SearchRange::default(),
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
            cancellation: None,
            scene_callback: None,
            temporal_smoothing: None,
        }
    }

    /// Select a sensitivity preset.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Override the verdict thresholds directly.
    ///
    /// Takes precedence over any preset set via
    /// [`with_sensitivity`](DetectOptions::with_sensitivity).
    #[must_use]
    pub fn with_custom_thresholds(mut self, intra_thresh: u32, intra_thresh2: u32) -> Self {
        self.custom_thresholds = Some((intra_thresh, intra_thresh2));
        self
    }

    /// Select the motion search window size.
    #[must_use]
    pub fn with_search_range(mut self, search_range: SearchRange) -> Self {
        self.search_range = search_range;
        self
    }

    /// Attach a progress callback.
    ///
    /// The callback is invoked every
    /// [`batch_size`](DetectOptions::with_batch_size) frames.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Fire the progress callback every `batch_size` frames instead of every
    /// frame. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Attach a cancellation token, checked once per frame.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Attach a synchronous per-cut callback, invoked at the moment of
    /// decision before the next frame is processed.
    #[must_use]
    pub fn with_scene_callback(mut self, callback: Arc<dyn SceneCallback>) -> Self {
        self.scene_callback = Some(callback);
        self
    }

    /// Enable the temporal-smoothing post-filter: after detection, any cut
    /// closer than `min_consecutive` frames to the previous surviving cut is
    /// dropped. The frame-0 cut always survives.
    #[must_use]
    pub fn with_temporal_smoothing(mut self, min_consecutive: u32) -> Self {
        self.temporal_smoothing = Some(min_consecutive);
        self
    }

    /// The effective `(T1, T2)` pair: the custom override if set, else the
    /// preset's.
    pub(crate) fn resolved_thresholds(&self) -> (u32, u32) {
        self.custom_thresholds
            .unwrap_or_else(|| self.sensitivity.thresholds())
    }
}
