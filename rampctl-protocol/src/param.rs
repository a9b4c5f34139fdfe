//! Configuration parameters pushed to the sensor unit
//!
//! Parameters go out as `CODE:VV\n`, where `VV` is the value right-aligned
//! in a two-character field (`"02: 5\n"`, `"02:30\n"`).

use core::fmt::Write;

use heapless::String;

use crate::command::CommandCode;

/// Capacity of an encoded parameter line (`"NN:VVV\n"` at most)
pub const PARAM_MESSAGE_LEN: usize = 8;

/// Encoded parameter line, ready to send
pub type EncodedParam = String<PARAM_MESSAGE_LEN>;

/// Order in which parameters are broadcast after a connect
pub const BROADCAST_ORDER: [CommandCode; 5] = [
    CommandCode::OperationMode,
    CommandCode::Direction,
    CommandCode::RelayTimer,
    CommandCode::Sensitivity,
    CommandCode::DirectionCategory,
];

/// A single keyed parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParamMessage {
    pub code: CommandCode,
    pub value: u8,
}

impl ParamMessage {
    pub fn new(code: CommandCode, value: u8) -> Self {
        Self { code, value }
    }

    /// Encode as a newline-terminated line
    pub fn encode(&self) -> EncodedParam {
        let mut out = EncodedParam::new();
        let [hi, lo] = *self.code.as_bytes();
        // Longest output is 7 bytes, always fits
        let _ = write!(out, "{}{}:{:>2}\n", hi as char, lo as char, self.value);
        out
    }
}
