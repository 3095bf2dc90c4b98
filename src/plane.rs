//! Padded luma planes and macroblock geometry.
//!
//! Motion search reads reference pixels at offsets of up to [`EDGE`] pixels
//! outside the visible frame. Rather than bounds-check every read, each
//! decoded plane is copied once into a larger buffer whose borders replicate
//! the nearest interior pixel. The interior itself is extended to the next
//! multiple of 16 so every macroblock is fully populated.
//!
//! [`PaddedPlane`] buffers are allocated once per resolution and reused for
//! every frame; [`PaddedPlane::load`] overwrites the buffer in place.

/// Width of the replicated border around the macroblock-aligned interior,
/// in pixels. Motion vectors within `±EDGE` of any legal macroblock can be
/// evaluated without bounds checks.
pub const EDGE: usize = 64;

/// Macroblock geometry derived from a frame's visible dimensions.
///
/// All fields are deterministic functions of `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MBParam {
    /// Visible frame width in pixels.
    pub width: usize,
    /// Visible frame height in pixels.
    pub height: usize,
    /// Number of macroblock columns: `ceil(width / 16)`.
    pub mb_width: usize,
    /// Number of macroblock rows: `ceil(height / 16)`.
    pub mb_height: usize,
    /// Padded plane width: `16 * mb_width + 2 * EDGE`.
    pub edged_width: usize,
    /// Padded plane height: `16 * mb_height + 2 * EDGE`.
    pub edged_height: usize,
}

impl MBParam {
    /// Derive the macroblock geometry for a `width x height` frame.
    pub fn new(width: usize, height: usize) -> Self {
        let mb_width = (width + 15) / 16;
        let mb_height = (height + 15) / 16;
        Self {
            width,
            height,
            mb_width,
            mb_height,
            edged_width: 16 * mb_width + 2 * EDGE,
            edged_height: 16 * mb_height + 2 * EDGE,
        }
    }

    /// Total number of macroblocks per frame.
    pub fn mb_count(&self) -> usize {
        self.mb_width * self.mb_height
    }

    /// Required buffer length for a padded plane, in bytes.
    pub fn padded_len(&self) -> usize {
        self.edged_width * self.edged_height
    }

    /// Byte offset of the top-left visible pixel inside a padded plane.
    pub fn origin(&self) -> usize {
        EDGE * self.edged_width + EDGE
    }
}

/// An edge-replicated luma plane sized `edged_width x edged_height`.
///
/// Owned exclusively by the detection driver; two instances are swapped
/// between the "previous" and "current" roles each frame.
#[derive(Debug, Clone)]
pub struct PaddedPlane {
    data: Vec<u8>,
}

impl PaddedPlane {
    /// Allocate a zeroed plane for the given geometry.
    pub fn new(param: &MBParam) -> Self {
        Self {
            data: vec![0; param.padded_len()],
        }
    }

    /// The padded pixel data, row-major with stride `param.edged_width`.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Fill this plane from a raw `width x height` luma plane.
    ///
    /// `src` must hold at least `width * height` bytes with stride `width`.
    /// The copy proceeds in four passes:
    ///
    /// 1. each source row lands at `(y + EDGE) * edged_width + EDGE`;
    /// 2. rows are extended rightward to `16 * mb_width` columns and the
    ///    last extended row downward to `16 * mb_height` rows, replicating
    ///    the nearest real pixel;
    /// 3. the first and last interior rows are copied into the `EDGE` rows
    ///    above and below;
    /// 4. the leftmost and rightmost interior columns are replicated into
    ///    the `EDGE` columns on either side, for every row.
    pub fn load(&mut self, src: &[u8], param: &MBParam) {
        debug_assert!(src.len() >= param.width * param.height);
        debug_assert_eq!(self.data.len(), param.padded_len());

        let ew = param.edged_width;
        let eh = param.edged_height;
        let w = param.width;
        let h = param.height;
        let padded_w = 16 * param.mb_width;
        let padded_h = 16 * param.mb_height;
        let dst = &mut self.data;

        dst.fill(0);

        for y in 0..h {
            let row = (y + EDGE) * ew + EDGE;
            dst[row..row + w].copy_from_slice(&src[y * w..y * w + w]);
        }

        if w < padded_w {
            for y in 0..h {
                let value = src[y * w + w - 1];
                let row = (y + EDGE) * ew + EDGE;
                dst[row + w..row + padded_w].fill(value);
            }
        }

        if h < padded_h {
            let last = (h - 1 + EDGE) * ew + EDGE;
            for y in h..padded_h {
                let row = (y + EDGE) * ew + EDGE;
                dst.copy_within(last..last + padded_w, row);
            }
        }

        // Top and bottom borders copy whole rows; the left/right pass below
        // fixes up the corner regions afterwards.
        for i in 0..EDGE {
            dst.copy_within(EDGE * ew..EDGE * ew + ew, i * ew);
            let last_interior = (eh - 1 - EDGE) * ew;
            dst.copy_within(last_interior..last_interior + ew, (eh - 1 - i) * ew);
        }

        for y in 0..eh {
            let row = y * ew;
            let left = dst[row + EDGE];
            let right = dst[row + EDGE + padded_w - 1];
            dst[row..row + EDGE].fill(left);
            dst[row + EDGE + padded_w..row + ew].fill(right);
        }
    }
}
