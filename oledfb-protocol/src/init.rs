//! Power-on initialization sequence
//!
//! Sent once, as a single command stream, before anything is drawn. The
//! register values are the reference panel's; only the geometry-dependent
//! ones (multiplex ratio, COM pins, column window) and contrast vary.

use oledfb_core::Geometry;

use crate::command::{self, addressing, control};
use crate::packet::Packet;

/// Build the initialization command stream for a panel
pub fn init_sequence(geometry: &Geometry, contrast: u8) -> Packet {
    let mux = (geometry.height() - 1) as u8;
    let com_pins = if geometry.height() == 64 { 0x12 } else { 0x02 };
    let last_column = (geometry.width() - 1) as u8;

    let sequence: [u8; 30] = [
        control::CMD_STREAM,
        command::DISPLAY_OFF,
        command::SET_CLOCK_DIV,
        0x80, // Default clock
        command::SET_MUX_RATIO,
        mux,
        command::SET_DISPLAY_OFFSET,
        0x00,
        command::SET_START_LINE,
        command::SET_CHARGE_PUMP,
        0x14, // Enable charge pump
        command::SET_MEMORY_MODE,
        addressing::PAGE,
        command::SET_SEG_REMAP,
        command::SET_COM_SCAN_DEC,
        command::SET_COM_PINS,
        com_pins,
        command::SET_PRECHARGE,
        0xF1,
        command::SET_CONTRAST,
        contrast,
        command::SET_VCOM_DETECT,
        0x40,
        command::RESUME_RAM,
        command::SET_NORMAL,
        command::DEACTIVATE_SCROLL,
        command::DISPLAY_ON,
        command::SET_COLUMN_ADDR,
        0x00,
        last_column,
    ];

    let mut packet = Packet::new();
    // 30 bytes always fit in a packet
    let _ = packet.extend_from_slice(&sequence);
    packet
}
