//! Bitmap decoder
//!
//! Packed 1-bit source images are decoded into canvas pixels. Two source
//! conventions are supported through one routine:
//!
//! - **BMP**: MSB-first within each byte, a set bit draws a pixel.
//! - **XBM**: LSB-first within each byte, a pixel is drawn when the source
//!   bit differs from the `invert` flag, so the same data can be rendered
//!   inverted without a second copy.
//!
//! Row `i` of a `w`-pixel-wide image starts at byte `(i * w) / 8`.

use heapless::Vec;

use crate::canvas::Canvas;
use crate::error::DrawError;
use crate::geometry::{Geometry, MAX_BUFFER_LEN};

/// Bit order within a source byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Bit 7 is the leftmost pixel
    MsbFirst,
    /// Bit 0 is the leftmost pixel
    LsbFirst,
}

/// Source convention: bit order plus polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeMode {
    /// MSB-first, set bits draw
    Bmp,
    /// LSB-first, bits unequal to `invert` draw
    Xbm { invert: bool },
}

impl DecodeMode {
    /// Bit order used by this mode
    pub const fn bit_order(self) -> BitOrder {
        match self {
            DecodeMode::Bmp => BitOrder::MsbFirst,
            DecodeMode::Xbm { .. } => BitOrder::LsbFirst,
        }
    }

    /// Clamp a requested width to the canvas
    ///
    /// The two modes clamp oversized widths differently and both are kept:
    /// BMP stops one column short of the canvas width, XBM uses all of it.
    pub const fn clamp_width(self, requested: usize, canvas_width: usize) -> usize {
        if requested <= canvas_width {
            return requested;
        }
        match self {
            DecodeMode::Bmp => canvas_width - 1,
            DecodeMode::Xbm { .. } => canvas_width,
        }
    }

    fn mask(self, column: usize) -> u8 {
        match self.bit_order() {
            BitOrder::MsbFirst => 1 << (7 - column % 8),
            BitOrder::LsbFirst => 1 << (column % 8),
        }
    }

    fn draws(self, bit: bool) -> bool {
        match self {
            DecodeMode::Bmp => bit,
            DecodeMode::Xbm { invert } => bit != invert,
        }
    }
}

/// Packed 1-bit image owned by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    mode: DecodeMode,
    pixels: Vec<u8, MAX_BUFFER_LEN>,
}

impl Bitmap {
    /// Copy a source image, clamping its dimensions to the canvas
    ///
    /// `width * height / 8` bytes are copied from `source`.
    pub fn new(
        geometry: &Geometry,
        source: &[u8],
        width: usize,
        height: usize,
        mode: DecodeMode,
    ) -> Result<Self, DrawError> {
        let width = mode.clamp_width(width, geometry.width());
        let height = height.min(geometry.height());
        let needed = width * height / 8;

        let bytes = source.get(..needed).ok_or(DrawError::SourceTooShort {
            needed,
            available: source.len(),
        })?;

        let mut pixels = Vec::new();
        // needed <= width * height / 8 <= buffer_len()
        pixels
            .extend_from_slice(bytes)
            .map_err(|_| DrawError::SourceTooShort {
                needed,
                available: MAX_BUFFER_LEN,
            })?;

        Ok(Self {
            width,
            height,
            mode,
            pixels,
        })
    }

    /// Width after clamping
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height after clamping
    pub fn height(&self) -> usize {
        self.height
    }

    /// Source convention
    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Copied source bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether the pixel at `(column, row)` should be drawn
    ///
    /// `None` when the packed data ends before this pixel.
    fn draws_at(&self, column: usize, row: usize) -> Option<bool> {
        let index = row * self.width / 8 + column / 8;
        let byte = *self.pixels.get(index)?;
        Some(self.mode.draws(byte & self.mode.mask(column) != 0))
    }
}

/// Where to put a bitmap on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Placement {
    /// Horizontal offset
    pub x: i32,
    /// Vertical offset
    pub y: i32,
    /// Add `canvas.width/2 - bitmap.width/2` to the horizontal offset
    pub center: bool,
}

impl Placement {
    /// Place the top-left corner at `(x, y)`
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            center: false,
        }
    }

    /// Center horizontally, keeping `x` as an extra offset
    pub const fn centered(self) -> Self {
        Self {
            center: true,
            ..self
        }
    }
}

/// Outcome of a blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlitSummary {
    /// Pixels set on the canvas
    pub drawn: usize,
    /// Pixels that fell outside the canvas and were dropped
    pub clipped: usize,
}

impl BlitSummary {
    /// True if nothing was dropped
    pub fn is_complete(&self) -> bool {
        self.clipped == 0
    }

    pub(crate) fn merge(&mut self, other: BlitSummary) {
        self.drawn += other.drawn;
        self.clipped += other.clipped;
    }
}

/// Decode `bitmap` into `canvas`
///
/// The centering offset may be negative for bitmaps wider than the canvas;
/// it is not clamped. Pixels outside the canvas, including those whose
/// coordinates do not fit in an `i32`, are counted, never written.
pub fn blit(canvas: &mut Canvas, bitmap: &Bitmap, placement: Placement) -> BlitSummary {
    let mut summary = BlitSummary::default();

    let mut origin_x = i64::from(placement.x);
    if placement.center {
        origin_x += (canvas.geometry().width() / 2) as i64 - (bitmap.width / 2) as i64;
    }
    let origin_y = i64::from(placement.y);

    for row in 0..bitmap.height {
        for column in 0..bitmap.width {
            if bitmap.draws_at(column, row) != Some(true) {
                continue;
            }
            let x = i32::try_from(origin_x + column as i64);
            let y = i32::try_from(origin_y + row as i64);
            let plotted = match (x, y) {
                (Ok(x), Ok(y)) => canvas.plot(x, y),
                _ => false,
            };
            if plotted {
                summary.drawn += 1;
            } else {
                summary.clipped += 1;
            }
        }
    }

    summary
}
