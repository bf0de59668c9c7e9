//! Bit-packed canvas
//!
//! One byte per column per page, least significant bit on top. Drawing is
//! additive: pixels are only ever set, never cleared, except by
//! [`Canvas::clear`] and the raw page operations.

use heapless::Vec;

use crate::error::DrawError;
use crate::geometry::{Geometry, MAX_BUFFER_LEN, PAGE_HEIGHT};

/// Raw fill patterns used to check a panel's wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestPattern {
    /// Odd pages fully lit, even pages dark
    AlternatePages,
    /// Odd columns fully lit on every page
    AlternateColumns,
}

/// In-memory framebuffer mirroring the panel's display RAM
#[derive(Debug, Clone)]
pub struct Canvas {
    geometry: Geometry,
    buffer: Vec<u8, MAX_BUFFER_LEN>,
}

impl Canvas {
    /// Allocate a zeroed canvas for the given geometry
    pub fn new(geometry: Geometry) -> Self {
        let mut buffer = Vec::new();
        // Geometry caps buffer_len() at MAX_BUFFER_LEN
        let _ = buffer.resize(geometry.buffer_len(), 0);
        Self { geometry, buffer }
    }

    /// Geometry this canvas was built for
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Byte index and bit mask for a pixel, `None` if off the canvas
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if !self.geometry.contains(x, y) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let page = y / PAGE_HEIGHT;
        let index = page * self.geometry.width() + x;
        Some((index, 1 << (y % PAGE_HEIGHT)))
    }

    /// Set the pixel at `(x, y)`
    ///
    /// Coordinates outside the canvas are rejected and leave the buffer
    /// untouched.
    pub fn set_pixel(&mut self, x: i32, y: i32) -> Result<(), DrawError> {
        if self.plot(x, y) {
            Ok(())
        } else {
            Err(DrawError::OutOfBounds { x, y })
        }
    }

    /// Set a pixel if it is on the canvas, returning whether it was
    pub(crate) fn plot(&mut self, x: i32, y: i32) -> bool {
        match self.locate(x, y) {
            Some((index, mask)) => {
                self.buffer[index] |= mask;
                true
            }
            None => false,
        }
    }

    /// Read back a pixel, `None` if off the canvas
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        self.locate(x, y)
            .map(|(index, mask)| self.buffer[index] & mask != 0)
    }

    /// Zero the whole buffer
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Complement every byte of one page (line highlight)
    pub fn invert_page(&mut self, page: usize) -> Result<(), DrawError> {
        let row = self
            .page_mut(page)
            .ok_or(DrawError::PageOutOfRange(page))?;
        for byte in row.iter_mut() {
            *byte = !*byte;
        }
        Ok(())
    }

    /// Bytes of one page in column order
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        let width = self.geometry.width();
        let start = page.checked_mul(width)?;
        self.buffer.get(start..start.checked_add(width)?)
    }

    fn page_mut(&mut self, page: usize) -> Option<&mut [u8]> {
        let width = self.geometry.width();
        let start = page.checked_mul(width)?;
        self.buffer.get_mut(start..start.checked_add(width)?)
    }

    /// Iterate pages in order
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.chunks(self.geometry.width())
    }

    /// The whole buffer, page after page
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Overwrite the buffer with a raw test pattern
    pub fn fill_test_pattern(&mut self, pattern: TestPattern) {
        let width = self.geometry.width();
        for (index, byte) in self.buffer.iter_mut().enumerate() {
            let (page, column) = (index / width, index % width);
            let lit = match pattern {
                TestPattern::AlternatePages => page % 2 == 1,
                TestPattern::AlternateColumns => column % 2 == 1,
            };
            *byte = if lit { 0xFF } else { 0x00 };
        }
    }
}

#[cfg(feature = "graphics")]
mod graphics {
    use core::convert::Infallible;

    use embedded_graphics_core::pixelcolor::BinaryColor;
    use embedded_graphics_core::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

    use super::Canvas;

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(
                self.geometry.width() as u32,
                self.geometry.height() as u32,
            )
        }
    }

    /// `Off` pixels are ignored, the canvas is additive.
    impl DrawTarget for Canvas {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if color.is_on() {
                    self.plot(point.x, point.y);
                }
            }
            Ok(())
        }
    }

}
