//! Command dispatch
//!
//! Routes a decoded command to the relay according to the operation mode.
//! Only vehicle-detect (`00`) and sensor-error (`99`) are accepted from the
//! sensor unit; every other front code is reported as unrecognized.

use rampctl_protocol::{CommandCode, DecodedCommand};

use crate::config::{ConfigurationSnapshot, OperationMode};
use crate::state::{DispatchOutcome, RelayState};
use crate::traits::{Level, OutputPort};

/// Apply one decoded command
pub fn dispatch<O: OutputPort>(
    cmd: &DecodedCommand,
    config: &mut ConfigurationSnapshot,
    relay: &mut RelayState,
    outputs: &mut O,
) -> DispatchOutcome {
    match cmd.code() {
        Some(CommandCode::VehicleDetect) => vehicle_detect(cmd.parameter(), config, relay, outputs),
        Some(CommandCode::SensorError) => {
            config.sensor_error_active = cmd.parameter() == 1;
            DispatchOutcome::SensorError {
                active: config.sensor_error_active,
            }
        }
        _ => DispatchOutcome::Unrecognized,
    }
}

fn vehicle_detect<O: OutputPort>(
    detect: i32,
    config: &ConfigurationSnapshot,
    relay: &mut RelayState,
    outputs: &mut O,
) -> DispatchOutcome {
    match config.operation_mode {
        OperationMode::Barrier => match detect {
            1 => {
                outputs.drive_relay(Level::High);
                DispatchOutcome::BarrierOpened
            }
            0 => {
                outputs.drive_relay(Level::Low);
                DispatchOutcome::BarrierClosed
            }
            _ => DispatchOutcome::Ignored { detect },
        },
        _ if !config.relay_timing_edge.matches(detect) => DispatchOutcome::Ignored { detect },
        mode if mode.is_counter() => DispatchOutcome::VehicleQueued {
            queued: relay.enqueue_vehicle(),
        },
        // Beacon
        _ => DispatchOutcome::RelayHold {
            ticks: relay.arm_hold(config.relay_timer_seconds, outputs),
        },
    }
}
