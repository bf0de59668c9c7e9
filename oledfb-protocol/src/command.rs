//! Controller command bytes
//!
//! Commands are sent after a command control byte; operands follow the
//! command byte in the same stream.

/// Control bytes prefixed to every transaction
pub mod control {
    /// Everything after this byte is a command stream
    pub const CMD_STREAM: u8 = 0x00;
    /// Exactly one command byte follows
    pub const CMD_BYTE: u8 = 0x80;
    /// Everything after this byte is display data
    pub const DATA_STREAM: u8 = 0x40;
    /// Exactly one data byte follows
    pub const DATA_BYTE: u8 = 0xC0;
}

/// Display off (sleep)
pub const DISPLAY_OFF: u8 = 0xAE;
/// Display on
pub const DISPLAY_ON: u8 = 0xAF;
/// Set clock divide ratio / oscillator frequency (1 operand)
pub const SET_CLOCK_DIV: u8 = 0xD5;
/// Set multiplex ratio (1 operand: rows - 1)
pub const SET_MUX_RATIO: u8 = 0xA8;
/// Set vertical display offset (1 operand)
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
/// Set display start line to RAM row 0 (OR the row into the low bits)
pub const SET_START_LINE: u8 = 0x40;
/// Charge pump setting (1 operand)
pub const SET_CHARGE_PUMP: u8 = 0x8D;
/// Set memory addressing mode (1 operand)
pub const SET_MEMORY_MODE: u8 = 0x20;
/// Column 127 mapped to SEG0
pub const SET_SEG_REMAP: u8 = 0xA1;
/// Scan from COM[N-1] to COM0
pub const SET_COM_SCAN_DEC: u8 = 0xC8;
/// COM pins hardware configuration (1 operand)
pub const SET_COM_PINS: u8 = 0xDA;
/// Pre-charge period (1 operand)
pub const SET_PRECHARGE: u8 = 0xD9;
/// Contrast control (1 operand)
pub const SET_CONTRAST: u8 = 0x81;
/// VCOMH deselect level (1 operand)
pub const SET_VCOM_DETECT: u8 = 0xDB;
/// Output follows RAM content
pub const RESUME_RAM: u8 = 0xA4;
/// Normal polarity (set bit = lit pixel)
pub const SET_NORMAL: u8 = 0xA6;
/// Inverse polarity
pub const SET_INVERSE: u8 = 0xA7;
/// Stop any hardware scroll
pub const DEACTIVATE_SCROLL: u8 = 0x2E;
/// Set column window (2 operands: start, end)
pub const SET_COLUMN_ADDR: u8 = 0x21;
/// Select page in page addressing mode (OR the page into the low bits)
pub const SET_PAGE_ADDR: u8 = 0xB0;

/// Operands for [`SET_MEMORY_MODE`]
pub mod addressing {
    /// Horizontal addressing
    pub const HORIZONTAL: u8 = 0x00;
    /// Vertical addressing
    pub const VERTICAL: u8 = 0x01;
    /// Page addressing, required by the page serializer
    pub const PAGE: u8 = 0x02;
}

/// Page select command for `page` (0..=7)
pub const fn select_page(page: u8) -> u8 {
    SET_PAGE_ADDR | (page & 0x07)
}
