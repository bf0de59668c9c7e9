//! Packet encoding and decoding
//!
//! A packet is the full byte sequence of one bus write: control byte plus
//! payload. Page serializer operations map onto packets as follows:
//!
//! - `SelectPage(p)`: `[0x80, 0xB0 | p]`
//! - `Data(row)`: `[0xC0, b]` per byte ([`FlushMode::PerByte`]) or
//!   `[0x40, row...]` once ([`FlushMode::Stream`])
//! - `ResetColumns { start, end }`: `[0x00, 0x21, start, end]`

use heapless::Vec;

use oledfb_core::geometry::MAX_WIDTH;
use oledfb_core::{FlushMode, PageOp};

use crate::command::{self, control};

/// Largest packet: control byte plus one full page row
pub const MAX_PACKET_LEN: usize = MAX_WIDTH + 1;

/// Bytes of a single bus write
pub type Packet = Vec<u8, MAX_PACKET_LEN>;

/// Errors that can occur while encoding or decoding packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// No bytes at all
    Empty,
    /// First byte is not a known control byte
    UnknownControl(u8),
    /// Single-byte control without its byte, or with extra bytes
    Malformed,
    /// Payload longer than [`MAX_PACKET_LEN`] allows
    TooLarge,
}

/// Payload of a decoded packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded<'a> {
    /// Command bytes with their operands
    Commands(&'a [u8]),
    /// Display data bytes
    Data(&'a [u8]),
}

/// Build a command-stream packet
pub fn command_stream(commands: &[u8]) -> Result<Packet, PacketError> {
    let mut packet = Packet::new();
    packet
        .push(control::CMD_STREAM)
        .map_err(|_| PacketError::TooLarge)?;
    packet
        .extend_from_slice(commands)
        .map_err(|_| PacketError::TooLarge)?;
    Ok(packet)
}

fn pair(control: u8, byte: u8) -> Packet {
    let mut packet = Packet::new();
    let _ = packet.extend_from_slice(&[control, byte]);
    packet
}

/// Iterator over the packets of one serializer operation
#[derive(Debug, Clone)]
pub struct Packets<'a> {
    op: PageOp<'a>,
    mode: FlushMode,
    index: usize,
    done: bool,
}

/// Encode one page operation
pub fn encode(op: PageOp<'_>, mode: FlushMode) -> Packets<'_> {
    Packets {
        op,
        mode,
        index: 0,
        done: false,
    }
}

impl<'a> Iterator for Packets<'a> {
    type Item = Packet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match (self.op, self.mode) {
            (PageOp::SelectPage(page), _) => {
                self.done = true;
                Some(pair(control::CMD_BYTE, command::select_page(page)))
            }
            (PageOp::ResetColumns { start, end }, _) => {
                self.done = true;
                let mut packet = Packet::new();
                let _ = packet.extend_from_slice(&[
                    control::CMD_STREAM,
                    command::SET_COLUMN_ADDR,
                    start,
                    end,
                ]);
                Some(packet)
            }
            (PageOp::Data(bytes), FlushMode::PerByte) => {
                let byte = *bytes.get(self.index)?;
                self.index += 1;
                if self.index == bytes.len() {
                    self.done = true;
                }
                Some(pair(control::DATA_BYTE, byte))
            }
            (PageOp::Data(bytes), FlushMode::Stream) => {
                self.done = true;
                let mut packet = Packet::new();
                let _ = packet.push(control::DATA_STREAM);
                // A page row is at most MAX_WIDTH bytes
                let _ = packet.extend_from_slice(bytes);
                Some(packet)
            }
        }
    }
}

/// Split a packet back into its payload
pub fn decode(packet: &[u8]) -> Result<Decoded<'_>, PacketError> {
    let (&control_byte, payload) = packet.split_first().ok_or(PacketError::Empty)?;
    if packet.len() > MAX_PACKET_LEN {
        return Err(PacketError::TooLarge);
    }

    match control_byte {
        control::CMD_STREAM => Ok(Decoded::Commands(payload)),
        control::DATA_STREAM => Ok(Decoded::Data(payload)),
        control::CMD_BYTE | control::DATA_BYTE if payload.len() != 1 => {
            Err(PacketError::Malformed)
        }
        control::CMD_BYTE => Ok(Decoded::Commands(payload)),
        control::DATA_BYTE => Ok(Decoded::Data(payload)),
        other => Err(PacketError::UnknownControl(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oledfb_core::{Canvas, Geometry, PageSerializer};
    use proptest::prelude::*;

    #[test]
    fn test_select_page_packet() {
        let packets: std::vec::Vec<Packet> =
            encode(PageOp::SelectPage(3), FlushMode::PerByte).collect();
        assert_eq!(packets.len(), 1);
        assert_eq!(&packets[0][..], &[0x80, 0xB3]);
    }

    #[test]
    fn test_reset_columns_packet() {
        let packets: std::vec::Vec<Packet> = encode(
            PageOp::ResetColumns { start: 0, end: 127 },
            FlushMode::Stream,
        )
        .collect();
        assert_eq!(&packets[0][..], &[0x00, 0x21, 0x00, 0x7F]);
    }

    #[test]
    fn test_data_per_byte() {
        let row = [0x01, 0x02, 0x03];
        let packets: std::vec::Vec<Packet> =
            encode(PageOp::Data(&row), FlushMode::PerByte).collect();
        assert_eq!(packets.len(), 3);
        assert_eq!(&packets[0][..], &[0xC0, 0x01]);
        assert_eq!(&packets[2][..], &[0xC0, 0x03]);
    }

    #[test]
    fn test_data_stream() {
        let row = [0xAAu8; 128];
        let packets: std::vec::Vec<Packet> =
            encode(PageOp::Data(&row), FlushMode::Stream).collect();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].len(), 129);
        assert_eq!(packets[0][0], 0x40);
    }

    #[test]
    fn test_empty_data_per_byte() {
        assert_eq!(encode(PageOp::Data(&[]), FlushMode::PerByte).count(), 0);
    }

    #[test]
    fn test_command_stream() {
        let packet = command_stream(&[0x81, 0x7F]).unwrap();
        assert_eq!(&packet[..], &[0x00, 0x81, 0x7F]);
        assert_eq!(
            command_stream(&[0u8; MAX_PACKET_LEN]),
            Err(PacketError::TooLarge)
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode(&[]), Err(PacketError::Empty));
        assert_eq!(decode(&[0x12, 0x00]), Err(PacketError::UnknownControl(0x12)));
        assert_eq!(decode(&[0x80]), Err(PacketError::Malformed));
        assert_eq!(decode(&[0xC0, 1, 2]), Err(PacketError::Malformed));
        assert_eq!(decode(&[0x40; 200]), Err(PacketError::TooLarge));
    }

    #[test]
    fn test_decode_payloads() {
        assert_eq!(decode(&[0x80, 0xB1]), Ok(Decoded::Commands(&[0xB1])));
        assert_eq!(decode(&[0xC0, 0x55]), Ok(Decoded::Data(&[0x55])));
        assert_eq!(decode(&[0x40, 1, 2, 3]), Ok(Decoded::Data(&[1, 2, 3])));
    }

    fn frame_data(canvas: &Canvas, mode: FlushMode) -> std::vec::Vec<u8> {
        let mut data = std::vec::Vec::new();
        for op in PageSerializer::new(canvas) {
            for packet in encode(op, mode) {
                if let Decoded::Data(bytes) = decode(&packet).unwrap() {
                    data.extend_from_slice(bytes);
                }
            }
        }
        data
    }

    proptest! {
        #[test]
        fn prop_frame_data_matches_canvas(
            points in proptest::collection::vec((0i32..128, 0i32..64), 0..48),
            stream in any::<bool>(),
        ) {
            let mut canvas = Canvas::new(Geometry::SSD1306_128X64);
            for (x, y) in points {
                canvas.set_pixel(x, y).unwrap();
            }
            let mode = if stream { FlushMode::Stream } else { FlushMode::PerByte };
            prop_assert_eq!(frame_data(&canvas, mode), canvas.as_bytes().to_vec());
        }
    }
}
