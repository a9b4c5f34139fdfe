//! Link transport to the sensor unit

use rampctl_protocol::Line;

/// Errors reported by a link transport
///
/// None of these are fatal; the controller reports them and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The underlying serial port or radio failed
    Io,
    /// An internal queue was full and an item was dropped
    QueueFull,
    /// A received line was too long and was discarded
    Overflow,
}

/// Something that happened on the link since the last poll
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// The sensor unit is now reachable
    Connected,
    /// The sensor unit went away
    Disconnected,
    /// A complete inbound line, terminator stripped
    Message(Line),
}

/// Transport carrying text lines to and from the sensor unit
pub trait LinkTransport {
    /// Housekeeping once per tick, before polling
    ///
    /// Transports use this to read hardware buffers, send probes and
    /// flush stale partial lines.
    fn service(&mut self) -> Result<(), LinkError> {
        Ok(())
    }

    /// Take the next pending event, if any
    fn poll(&mut self) -> Result<Option<LinkEvent>, LinkError>;

    /// Send bytes to the sensor unit
    fn send(&mut self, data: &[u8]) -> Result<(), LinkError>;

    /// Check whether the sensor unit is currently connected
    fn is_connected(&self) -> bool;
}
