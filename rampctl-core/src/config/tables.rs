//! Lookup tables for values derived from analog readings

/// Lower bounds (inclusive) of relay-timer buckets 1..=8
///
/// Readings below the first boundary fall into bucket 0.
pub const RELAY_TIMER_BOUNDARIES: [u16; 8] = [500, 1000, 1500, 2000, 2500, 3000, 3500, 4000];

/// Relay hold time in seconds for each bucket
pub const RELAY_TIMER_SECONDS: [u8; 9] = [0, 3, 5, 7, 10, 12, 15, 20, 30];

/// Highest sensitivity level understood by the sensor unit
pub const MAX_SENSITIVITY_LEVEL: u8 = 9;

/// Battery level reported when no measurement exists
pub const DEFAULT_BATTERY_LEVEL: u8 = 9;

/// Map a raw 12-bit potentiometer reading to a relay hold time
///
/// Pure step function; readings above full scale land in the last bucket.
pub fn relay_timer_seconds(raw: u16) -> u8 {
    let bucket = RELAY_TIMER_BOUNDARIES
        .iter()
        .take_while(|&&boundary| raw >= boundary)
        .count();
    RELAY_TIMER_SECONDS[bucket]
}
