//! Minimal TOML parser for panel configuration
//!
//! Handles only the subset the panel settings need:
//! - `[display]` and `[i2c]` section headers
//! - `key = value` pairs (decimal or `0x` hex integers, quoted strings)
//! - Comments (`# ...`), whole-line or trailing
//!
//! Unknown keys are ignored so a shared file can carry other settings.
//!
//! ```toml
//! [display]
//! width = 128
//! height = 64
//! contrast = 0xCF
//! flush_mode = "stream"
//!
//! [i2c]
//! address = 0x3C
//! timeout_ms = 500
//! frequency_hz = 400000
//! ```

use super::types::{DisplayConfig, FlushMode};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value of the wrong type or out of range
    InvalidValue,
    /// Line that is neither a header nor `key = value`
    InvalidLine,
    /// Dimensions do not form a supported geometry
    InvalidGeometry,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    I2c,
}

/// Parse TOML text into a [`DisplayConfig`], starting from the defaults
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config
        .geometry()
        .map_err(|_| ParseError::InvalidGeometry)?;

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "i2c" => Ok(Section::I2c),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse a decimal or `0x`-prefixed hex integer
fn parse_int(value: &str) -> Result<u32, ParseError> {
    let value = strip_separators(value);
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| ParseError::InvalidValue)
}

fn parse_u8(value: &str) -> Result<u8, ParseError> {
    u8::try_from(parse_int(value)?).map_err(|_| ParseError::InvalidValue)
}

fn parse_flush_mode(value: &str) -> Result<FlushMode, ParseError> {
    match parse_string(value) {
        "per_byte" => Ok(FlushMode::PerByte),
        "stream" => Ok(FlushMode::Stream),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Drop `_` digit separators (`400_000`); overlong values come back empty
fn strip_separators(value: &str) -> heapless::String<16> {
    let mut out = heapless::String::new();
    for ch in value.chars().filter(|&c| c != '_') {
        if out.push(ch).is_err() {
            return heapless::String::new();
        }
    }
    out
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Display, "width") => config.width = parse_u8(value)?,
        (Section::Display, "height") => config.height = parse_u8(value)?,
        (Section::Display, "contrast") => config.contrast = parse_u8(value)?,
        (Section::Display, "flush_mode") => config.flush_mode = parse_flush_mode(value)?,
        (Section::I2c, "address") => {
            let address = parse_u8(value)?;
            if address > 0x7F {
                return Err(ParseError::InvalidValue);
            }
            config.address = address;
        }
        (Section::I2c, "timeout_ms") => config.timeout_ms = parse_int(value)?,
        (Section::I2c, "frequency_hz") => config.frequency_hz = parse_int(value)?,
        _ => {}
    }
    Ok(())
}
