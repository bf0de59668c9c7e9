//! Display geometry
//!
//! Dimensions are fixed for the lifetime of a session and handed to every
//! component explicitly.

/// Rows covered by one page
pub const PAGE_HEIGHT: usize = 8;

/// Widest supported panel (column address window is 0..=127)
pub const MAX_WIDTH: usize = 128;

/// Tallest supported panel (page select addresses pages 0..=7)
pub const MAX_HEIGHT: usize = 64;

/// Maximum number of pages
pub const MAX_PAGES: usize = MAX_HEIGHT / PAGE_HEIGHT;

/// Largest framebuffer in bytes
pub const MAX_BUFFER_LEN: usize = MAX_WIDTH * MAX_PAGES;

/// Geometry validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Width or height is zero
    ZeroSized,
    /// Width exceeds [`MAX_WIDTH`]
    TooWide,
    /// Height exceeds [`MAX_HEIGHT`]
    TooTall,
}

/// Pixel dimensions of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    width: usize,
    height: usize,
}

impl Geometry {
    /// The reference 128x64 panel
    pub const SSD1306_128X64: Self = Self {
        width: 128,
        height: 64,
    };

    /// The half-height 128x32 variant
    pub const SSD1306_128X32: Self = Self {
        width: 128,
        height: 32,
    };

    /// Validate and create a geometry
    pub const fn new(width: usize, height: usize) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::ZeroSized);
        }
        if width > MAX_WIDTH {
            return Err(GeometryError::TooWide);
        }
        if height > MAX_HEIGHT {
            return Err(GeometryError::TooTall);
        }
        Ok(Self { width, height })
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of 8-row pages, rounding a partial last page up
    pub const fn pages(&self) -> usize {
        self.height.div_ceil(PAGE_HEIGHT)
    }

    /// Framebuffer size in bytes
    pub const fn buffer_len(&self) -> usize {
        self.width * self.pages()
    }

    /// True if `(x, y)` is a pixel on the panel
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::SSD1306_128X64
    }
}
