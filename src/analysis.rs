//! Per-frame macroblock classification.
//!
//! Every macroblock of the current frame is motion-searched against the
//! reference frame and classified as *inter* (well predicted by motion) or
//! *intra* (better explained by its own spatial content). The per-frame
//! counters feed the scene-change verdict.

use crate::block::{dev8, variance16};
use crate::motion::{self, MotionVector};
use crate::plane::{MBParam, PaddedPlane, EDGE};

/// Analysis record for one macroblock. Recomputed every frame; the backing
/// array is allocated once and reused.
#[derive(Debug, Clone, Copy, Default)]
pub struct Macroblock {
    /// Best motion vector against the reference frame.
    pub mv: MotionVector,
    /// SAD of the motion-compensated prediction.
    pub sad: u32,
    /// Spatial variance of the block.
    pub variance: u32,
    /// Whether the block's own content beats its motion prediction.
    pub is_intra: bool,
}

/// Aggregated statistics for one analyzed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of macroblocks classified intra.
    pub intra_blocks: u32,
    /// Sum of motion-compensated SAD over all macroblocks.
    pub sum_sad: u64,
    /// Sum of spatial variance over all macroblocks.
    pub sum_variance: u64,
}

/// Classify every macroblock of `current` against `reference`.
///
/// `macroblocks` must hold `param.mb_count()` entries; each is overwritten.
/// Blocks are visited in raster order, which keeps the whole analysis
/// deterministic.
pub fn analyze_frame(
    reference: &PaddedPlane,
    current: &PaddedPlane,
    param: &MBParam,
    fcode: u8,
    macroblocks: &mut [Macroblock],
) -> FrameStats {
    debug_assert_eq!(macroblocks.len(), param.mb_count());

    let stride = param.edged_width;
    let mut stats = FrameStats::default();

    for mb_y in 0..param.mb_height {
        for mb_x in 0..param.mb_width {
            let (mv, sad_inter) = motion::search(reference, current, param, mb_x, mb_y, fcode);

            let origin = (EDGE + mb_y * 16) * stride + EDGE + mb_x * 16;
            let block = &current.data()[origin..];
            let variance = variance16(block, stride);

            // Intra cost: deviation of each 8x8 quadrant from its own mean.
            let sad_intra = dev8(block, stride)
                + dev8(&block[8..], stride)
                + dev8(&block[8 * stride..], stride)
                + dev8(&block[8 * stride + 8..], stride);

            let is_intra = sad_inter > sad_intra;

            macroblocks[mb_y * param.mb_width + mb_x] = Macroblock {
                mv,
                sad: sad_inter,
                variance,
                is_intra,
            };

            if is_intra {
                stats.intra_blocks += 1;
            }
            stats.sum_sad += sad_inter as u64;
            stats.sum_variance += variance as u64;
        }
    }

    stats
}
