//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Geometry, GeometryError};

/// Default 7-bit bus address of the panel
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Default per-transaction timeout
pub const DEFAULT_TIMEOUT_MS: u32 = 500;

/// How page data is packed into bus transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlushMode {
    /// One two-byte transaction per data byte
    #[default]
    PerByte,
    /// One data-stream transaction per page
    Stream,
}

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Width in pixels
    pub width: u8,
    /// Height in pixels
    pub height: u8,
    /// 7-bit bus address
    pub address: u8,
    /// Per-transaction timeout in milliseconds
    pub timeout_ms: u32,
    /// Contrast sent during initialization
    pub contrast: u8,
    /// Transaction packing for refreshes
    pub flush_mode: FlushMode,
    /// Bus clock in Hz
    pub frequency_hz: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            address: DEFAULT_ADDRESS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            contrast: 0xFF,
            flush_mode: FlushMode::PerByte,
            frequency_hz: 400_000,
        }
    }
}

impl DisplayConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Validated geometry for this panel
    pub fn geometry(&self) -> Result<Geometry, GeometryError> {
        Geometry::new(self.width as usize, self.height as usize)
    }
}
