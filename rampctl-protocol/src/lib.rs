//! Sensor Link Protocol
//!
//! This crate defines the text protocol spoken between the ramp controller
//! and the vehicle sensor unit. The same protocol runs over a UART line or
//! over the Nordic UART Service of a BLE link.
//!
//! # Protocol Overview
//!
//! Every message is a short ASCII line:
//! ```text
//! ┌──────┬───┬───────┬────┐
//! │ CODE │ : │ VALUE │ \n │
//! │ 2B   │   │ 1–2B  │    │
//! └──────┴───┴───────┴────┘
//! ```
//!
//! The sensor reports vehicle presence (`00`) and its own health (`99`).
//! The controller pushes its DIP-switch configuration (`01`–`08`) after
//! every connect. Decoding is deliberately lenient: the two bytes on either
//! side of the first `:` are taken verbatim and the value parses like
//! C `atoi`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod handshake;
pub mod line;
pub mod param;

pub use command::{decode, CommandCode, DecodeError, DecodedCommand, DELIMITER};
pub use handshake::{classify, HandshakeLine, PROBE_MESSAGE};
pub use line::{Line, LineAssembler, LineError, MAX_LINE_LEN};
pub use param::{EncodedParam, ParamMessage, BROADCAST_ORDER};
