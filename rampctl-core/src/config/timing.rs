//! Control loop timing

/// Default control tick period in milliseconds
pub const TICK_INTERVAL_MS: u32 = 100;

/// Timing parameters for the control loop, all expressed in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Control ticks per second; relay hold times scale with this
    pub ticks_per_second: u16,
    /// Gap before each configuration broadcast message
    pub broadcast_spacing_ticks: u16,
    /// Interval between UART presence probes while disconnected
    pub probe_interval_ticks: u16,
    /// Quiet ticks after which an unterminated line is taken as complete
    pub idle_flush_ticks: u16,
    /// Power LED half period while disconnected
    pub power_blink_half_period: u16,
    /// Error LED half period while the sensor reports a fault
    pub error_blink_half_period: u16,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: 10,
            broadcast_spacing_ticks: 5,
            probe_interval_ticks: 10,
            idle_flush_ticks: 2,
            power_blink_half_period: 1,
            error_blink_half_period: 5,
        }
    }
}

impl TimingConfig {
    /// Tick period implied by `ticks_per_second`
    pub fn tick_interval_ms(&self) -> u32 {
        1000 / self.ticks_per_second.max(1) as u32
    }
}
