//! Session configuration snapshot
//!
//! Built once at boot from the DIP switches and potentiometers. Only the
//! sensor error flag changes while the controller runs.

use rampctl_protocol::CommandCode;

use super::tables::{relay_timer_seconds, DEFAULT_BATTERY_LEVEL, MAX_SENSITIVITY_LEVEL};
use crate::inputs::ConfigurationInputs;

/// How vehicle events drive the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Warning light: relay held for the configured time after a trigger
    #[default]
    Beacon,
    /// Barrier bar: relay follows vehicle presence directly
    Barrier,
    /// Counter: one fixed-length pulse per vehicle
    Counter,
    /// Counter, second DIP position
    CounterAlt,
}

impl OperationMode {
    /// Decode the two operation-mode switch bits
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => OperationMode::Beacon,
            1 => OperationMode::Barrier,
            2 => OperationMode::Counter,
            _ => OperationMode::CounterAlt,
        }
    }

    /// Wire value sent to the sensor unit
    pub fn code(self) -> u8 {
        match self {
            OperationMode::Beacon => 0,
            OperationMode::Barrier => 1,
            OperationMode::Counter => 2,
            OperationMode::CounterAlt => 3,
        }
    }

    /// Returns true for both counter variants
    pub fn is_counter(self) -> bool {
        matches!(self, OperationMode::Counter | OperationMode::CounterAlt)
    }
}

/// Traffic direction the sensor is mounted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn from_switch(on: bool) -> Self {
        if on {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Direction::LeftToRight => 0,
            Direction::RightToLeft => 1,
        }
    }
}

/// Which vehicle event starts a relay hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayTimingEdge {
    /// Trigger when a vehicle enters (detect = 1)
    #[default]
    OnEntry,
    /// Trigger when a vehicle leaves (detect = 0)
    OnExit,
}

impl RelayTimingEdge {
    pub fn from_switch(on: bool) -> Self {
        if on {
            RelayTimingEdge::OnExit
        } else {
            RelayTimingEdge::OnEntry
        }
    }

    pub fn code(self) -> u8 {
        match self {
            RelayTimingEdge::OnEntry => 0,
            RelayTimingEdge::OnExit => 1,
        }
    }

    /// Check whether a vehicle-detect value fires on this edge
    pub fn matches(self, detect: i32) -> bool {
        matches!(
            (self, detect),
            (RelayTimingEdge::OnEntry, 1) | (RelayTimingEdge::OnExit, 0)
        )
    }
}

/// Configuration in effect for the current power cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationSnapshot {
    pub operation_mode: OperationMode,
    pub direction: Direction,
    pub relay_timing_edge: RelayTimingEdge,
    /// Relay hold time, one of [`super::RELAY_TIMER_SECONDS`]
    pub relay_timer_seconds: u8,
    /// Sensor sensitivity, 0–9
    pub sensitivity_level: u8,
    /// Direction sensitivity category, 0–3
    pub direction_category: u8,
    /// Diagnostic only, 0–9
    pub battery_level: u8,
    /// Set while the sensor unit reports a fault
    pub sensor_error_active: bool,
}

impl Default for ConfigurationSnapshot {
    fn default() -> Self {
        Self {
            operation_mode: OperationMode::Beacon,
            direction: Direction::LeftToRight,
            relay_timing_edge: RelayTimingEdge::OnEntry,
            relay_timer_seconds: 5,
            sensitivity_level: 0,
            direction_category: 0,
            battery_level: DEFAULT_BATTERY_LEVEL,
            sensor_error_active: false,
        }
    }
}

impl ConfigurationSnapshot {
    /// Build the snapshot from sampled switch and potentiometer values
    ///
    /// The sensitivity potentiometer reading is not used; sensitivity comes
    /// from the two sensitivity switches.
    pub fn from_inputs(inputs: &ConfigurationInputs) -> Self {
        Self {
            operation_mode: OperationMode::from_bits(inputs.operation_mode_bits),
            direction: Direction::from_switch(inputs.direction_bit),
            relay_timing_edge: RelayTimingEdge::from_switch(inputs.relay_timing_bit),
            relay_timer_seconds: relay_timer_seconds(inputs.raw_relay_timer_adc),
            sensitivity_level: (inputs.sensitivity_bits & 0b11).min(MAX_SENSITIVITY_LEVEL),
            direction_category: inputs.direction_category_bits & 0b11,
            battery_level: DEFAULT_BATTERY_LEVEL,
            sensor_error_active: false,
        }
    }

    /// Value broadcast to the sensor unit for a parameter code
    ///
    /// Returns `None` for codes the controller does not own.
    pub fn broadcast_value(&self, code: CommandCode) -> Option<u8> {
        match code {
            CommandCode::OperationMode => Some(self.operation_mode.code()),
            CommandCode::Direction => Some(self.direction.code()),
            CommandCode::RelayTimer => Some(self.relay_timer_seconds),
            CommandCode::RelayTiming => Some(self.relay_timing_edge.code()),
            CommandCode::Sensitivity => Some(self.sensitivity_level),
            CommandCode::BatteryLevel => Some(self.battery_level),
            CommandCode::DirectionCategory => Some(self.direction_category),
            CommandCode::VehicleDetect | CommandCode::BleTxPower | CommandCode::SensorError => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ConfigurationInputs {
        ConfigurationInputs {
            operation_mode_bits: 0,
            direction_bit: false,
            relay_timing_bit: false,
            direction_category_bits: 0,
            sensitivity_bits: 0,
            raw_relay_timer_adc: 0,
            raw_sensitivity_adc: 0,
        }
    }

    #[test]
    fn test_operation_mode_bits() {
        assert_eq!(OperationMode::from_bits(0), OperationMode::Beacon);
        assert_eq!(OperationMode::from_bits(1), OperationMode::Barrier);
        assert_eq!(OperationMode::from_bits(2), OperationMode::Counter);
        assert_eq!(OperationMode::from_bits(3), OperationMode::CounterAlt);
        // Only the low two bits count
        assert_eq!(OperationMode::from_bits(0b101), OperationMode::Barrier);
    }

    #[test]
    fn test_counter_modes() {
        assert!(OperationMode::Counter.is_counter());
        assert!(OperationMode::CounterAlt.is_counter());
        assert!(!OperationMode::Beacon.is_counter());
        assert!(!OperationMode::Barrier.is_counter());
    }

    #[test]
    fn test_edge_matching() {
        assert!(RelayTimingEdge::OnEntry.matches(1));
        assert!(!RelayTimingEdge::OnEntry.matches(0));
        assert!(RelayTimingEdge::OnExit.matches(0));
        assert!(!RelayTimingEdge::OnExit.matches(1));
        assert!(!RelayTimingEdge::OnEntry.matches(2));
    }

    #[test]
    fn test_from_inputs() {
        let snapshot = ConfigurationSnapshot::from_inputs(&ConfigurationInputs {
            operation_mode_bits: 2,
            direction_bit: true,
            relay_timing_bit: true,
            direction_category_bits: 3,
            sensitivity_bits: 2,
            raw_relay_timer_adc: 1200,
            raw_sensitivity_adc: 4000,
        });

        assert_eq!(snapshot.operation_mode, OperationMode::Counter);
        assert_eq!(snapshot.direction, Direction::RightToLeft);
        assert_eq!(snapshot.relay_timing_edge, RelayTimingEdge::OnExit);
        assert_eq!(snapshot.relay_timer_seconds, 5);
        assert_eq!(snapshot.sensitivity_level, 2);
        assert_eq!(snapshot.direction_category, 3);
        assert_eq!(snapshot.battery_level, DEFAULT_BATTERY_LEVEL);
        assert!(!snapshot.sensor_error_active);
    }

    #[test]
    fn test_from_inputs_defaults() {
        let snapshot = ConfigurationSnapshot::from_inputs(&inputs());
        assert_eq!(snapshot.operation_mode, OperationMode::Beacon);
        assert_eq!(snapshot.direction, Direction::LeftToRight);
        assert_eq!(snapshot.relay_timing_edge, RelayTimingEdge::OnEntry);
        assert_eq!(snapshot.relay_timer_seconds, 0);
    }

    #[test]
    fn test_broadcast_values() {
        let snapshot = ConfigurationSnapshot {
            operation_mode: OperationMode::Barrier,
            direction: Direction::RightToLeft,
            relay_timer_seconds: 12,
            sensitivity_level: 3,
            direction_category: 2,
            ..Default::default()
        };

        assert_eq!(snapshot.broadcast_value(CommandCode::OperationMode), Some(1));
        assert_eq!(snapshot.broadcast_value(CommandCode::Direction), Some(1));
        assert_eq!(snapshot.broadcast_value(CommandCode::RelayTimer), Some(12));
        assert_eq!(snapshot.broadcast_value(CommandCode::Sensitivity), Some(3));
        assert_eq!(snapshot.broadcast_value(CommandCode::DirectionCategory), Some(2));
        assert_eq!(snapshot.broadcast_value(CommandCode::VehicleDetect), None);
        assert_eq!(snapshot.broadcast_value(CommandCode::SensorError), None);
    }
}
