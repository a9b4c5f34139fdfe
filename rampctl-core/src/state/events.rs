//! Results reported by the dispatcher and the relay state machine

/// Relay state change made by one [`super::RelayState::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayTransition {
    /// A queued vehicle started a hold of `ticks`
    Energized { ticks: u32, queued: u16 },
    /// The hold ended and the relay dropped
    Released { queued: u16 },
}

/// What the dispatcher did with one decoded command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchOutcome {
    /// Beacon hold armed for `ticks` (0 when the relay timer is 0 s)
    RelayHold { ticks: u32 },
    /// Barrier opened, relay High
    BarrierOpened,
    /// Barrier closed, relay Low
    BarrierClosed,
    /// Counter mode queued a vehicle
    VehicleQueued { queued: u16 },
    /// Vehicle detect value did not match the trigger edge or was out of range
    Ignored { detect: i32 },
    /// Sensor error flag written
    SensorError { active: bool },
    /// Front code is not one the controller accepts
    Unrecognized,
}
