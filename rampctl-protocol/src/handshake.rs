//! UART presence handshake with the sensor unit
//!
//! Over UART there is no link-layer connection event. The sensor announces
//! a (re)boot with a line containing `start` and answers the controller's
//! probe with a line containing `sensor`. Everything else is a command.

/// Probe sent by the controller until the sensor answers
pub const PROBE_MESSAGE: &[u8] = b"_mobi-ramp\n";

/// Marker in the sensor's boot announcement
const START_TOKEN: &[u8] = b"start";

/// Marker in the sensor's probe answer
const PRESENCE_TOKEN: &[u8] = b"sensor";

/// Classification of a line received over UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeLine {
    /// Sensor (re)booted
    SensorStarted,
    /// Sensor answered the probe
    SensorPresent,
    /// Anything else; candidate command
    Payload,
}

/// Classify a received line
///
/// A boot announcement takes precedence over a presence answer.
pub fn classify(line: &[u8]) -> HandshakeLine {
    if contains(line, START_TOKEN) {
        HandshakeLine::SensorStarted
    } else if contains(line, PRESENCE_TOKEN) {
        HandshakeLine::SensorPresent
    } else {
        HandshakeLine::Payload
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
