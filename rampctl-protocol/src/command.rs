//! Command decoding for sensor-originated messages
//!
//! A message carries a two-character front code and a two-character back
//! code around a `:` delimiter. Decoding only splits the text; deciding
//! what a code means is left to the dispatcher.

use heapless::Vec;

/// Separator between the front (command) and back (value) codes
pub const DELIMITER: u8 = b':';

/// Width of a front or back code in bytes
pub const CODE_LEN: usize = 2;

/// Errors that can occur while decoding a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The message contains no `:` delimiter
    NoDelimiter,
}

/// Command codes shared by both directions of the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandCode {
    /// Vehicle entered (1) or left (0) the detection zone
    VehicleDetect,
    /// Sensor mounting direction
    Direction,
    /// Relay hold time in seconds
    RelayTimer,
    /// Relay trigger edge (entry or exit)
    RelayTiming,
    /// Detection sensitivity level
    Sensitivity,
    /// Battery level of the sensor unit
    BatteryLevel,
    /// Controller operation mode
    OperationMode,
    /// Radio transmit power of the sensor unit
    BleTxPower,
    /// Direction sensitivity category
    DirectionCategory,
    /// Sensor self-test failure (1) or recovery (0)
    SensorError,
}

/// Every command, in wire-code order
const ALL_CODES: [CommandCode; 10] = [
    CommandCode::VehicleDetect,
    CommandCode::Direction,
    CommandCode::RelayTimer,
    CommandCode::RelayTiming,
    CommandCode::Sensitivity,
    CommandCode::BatteryLevel,
    CommandCode::OperationMode,
    CommandCode::BleTxPower,
    CommandCode::DirectionCategory,
    CommandCode::SensorError,
];

impl CommandCode {
    /// Look up a command by its wire code
    pub fn from_code(code: &[u8]) -> Option<Self> {
        ALL_CODES
            .iter()
            .copied()
            .find(|cmd| cmd.as_bytes().as_slice() == code)
    }

    /// Wire representation of this command
    pub fn as_bytes(self) -> &'static [u8; CODE_LEN] {
        match self {
            CommandCode::VehicleDetect => b"00",
            CommandCode::Direction => b"01",
            CommandCode::RelayTimer => b"02",
            CommandCode::RelayTiming => b"03",
            CommandCode::Sensitivity => b"04",
            CommandCode::BatteryLevel => b"05",
            CommandCode::OperationMode => b"06",
            CommandCode::BleTxPower => b"07",
            CommandCode::DirectionCategory => b"08",
            CommandCode::SensorError => b"99",
        }
    }
}

/// A message split into its front and back codes
///
/// Either code may be shorter than two bytes when the delimiter sits
/// near the edge of the message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedCommand {
    front: Vec<u8, CODE_LEN>,
    back: Vec<u8, CODE_LEN>,
}

impl DecodedCommand {
    /// Raw front code bytes
    pub fn front(&self) -> &[u8] {
        &self.front
    }

    /// Raw back code bytes
    pub fn back(&self) -> &[u8] {
        &self.back
    }

    /// The command named by the front code, if it is a known one
    pub fn code(&self) -> Option<CommandCode> {
        CommandCode::from_code(&self.front)
    }

    /// Back code parsed as a decimal integer
    ///
    /// Leading whitespace and a sign are accepted, parsing stops at the
    /// first non-digit and anything unparseable reads as 0.
    pub fn parameter(&self) -> i32 {
        parse_leading_int(&self.back)
    }
}

/// Split a raw message around its first delimiter
///
/// The front code is the (up to) two bytes before the delimiter and the
/// back code the (up to) two bytes after it. Out-of-range positions are
/// clamped to the message bounds, so this never fails on short input.
pub fn decode(raw: &[u8]) -> Result<DecodedCommand, DecodeError> {
    let split = raw
        .iter()
        .position(|&b| b == DELIMITER)
        .ok_or(DecodeError::NoDelimiter)?;

    let front_start = split.saturating_sub(CODE_LEN);
    let back_end = (split + 1 + CODE_LEN).min(raw.len());

    Ok(DecodedCommand {
        front: raw[front_start..split].iter().copied().collect(),
        back: raw[split + 1..back_end].iter().copied().collect(),
    })
}

fn parse_leading_int(bytes: &[u8]) -> i32 {
    let mut iter = bytes
        .iter()
        .copied()
        .skip_while(|b| b.is_ascii_whitespace())
        .peekable();

    let negative = match iter.peek() {
        Some(b'-') => {
            iter.next();
            true
        }
        Some(b'+') => {
            iter.next();
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    for b in iter {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add((b - b'0') as i32);
    }

    if negative {
        -value
    } else {
        value
    }
}
