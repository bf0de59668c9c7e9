//! SSD1306-family wire protocol
//!
//! Every bus write starts with a control byte telling the controller how to
//! treat what follows:
//!
//! ```text
//! ┌─────────┬──────────────────────────────┐
//! │ CONTROL │ PAYLOAD                      │
//! │ 1B      │ 1B (single) or 1..=128B      │
//! └─────────┴──────────────────────────────┘
//!   0x00  command stream     0x80  single command
//!   0x40  data stream        0xC0  single data byte
//! ```
//!
//! This crate holds the command set, the power-on initialization sequence,
//! and the encoding of page serializer output into bus packets.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod init;
pub mod packet;

pub use command::control;
pub use init::init_sequence;
pub use packet::{
    command_stream, decode, encode, Decoded, Packet, PacketError, Packets, MAX_PACKET_LEN,
};
