//! Controller task
//!
//! Runs one controller tick per tick signal and logs what happened.

use defmt::*;

use rampctl_core::state::{DispatchOutcome, RelayTransition};
use rampctl_core::{ControllerEvent, RampController};

use crate::board::{Outputs, SensorLink};
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main control loop
#[embassy_executor::task]
pub async fn controller_task(
    mut controller: RampController,
    mut link: SensorLink,
    mut outputs: Outputs,
) {
    info!("Controller task started");

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        let report = controller.tick(&mut link, &mut outputs);
        for event in report.events() {
            log_event(now_ms, event);
        }
        if report.overflowed() > 0 {
            warn!("{} controller events not logged", report.overflowed());
        }
    }
}

fn log_event(now_ms: u32, event: &ControllerEvent) {
    match event {
        ControllerEvent::LinkConnected => {
            info!("[{} ms] Sensor connected, sending configuration", now_ms)
        }
        ControllerEvent::LinkDisconnected => {
            warn!("[{} ms] Sensor disconnected, outputs released", now_ms)
        }
        ControllerEvent::SessionReady => info!("Configuration sent, accepting commands"),
        ControllerEvent::ParamSent(msg) => debug!("Sent {:?} = {}", msg.code, msg.value),
        ControllerEvent::ParamSendFailed { code, error } => {
            warn!("Failed to send {:?}: {:?}", code, error)
        }
        ControllerEvent::Relay(RelayTransition::Energized { ticks, queued }) => {
            debug!("Relay on for {} ticks, {} vehicles queued", ticks, queued)
        }
        ControllerEvent::Relay(RelayTransition::Released { queued }) => {
            debug!("Relay off, {} vehicles queued", queued)
        }
        ControllerEvent::Dispatched(outcome) => log_outcome(outcome),
        ControllerEvent::DecodeFailed(e) => warn!("Dropped message: {:?}", e),
        ControllerEvent::MessageDropped => debug!("Message before configuration complete, dropped"),
        ControllerEvent::LinkFault(e) => warn!("Link error: {:?}", e),
    }
}

fn log_outcome(outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::RelayHold { ticks } => info!("Vehicle detected, relay hold {} ticks", ticks),
        DispatchOutcome::BarrierOpened => info!("Barrier open"),
        DispatchOutcome::BarrierClosed => info!("Barrier closed"),
        DispatchOutcome::VehicleQueued { queued } => info!("Vehicle counted, {} queued", queued),
        DispatchOutcome::Ignored { detect } => trace!("Vehicle detect {} ignored", detect),
        DispatchOutcome::SensorError { active: true } => warn!("Sensor reports an error"),
        DispatchOutcome::SensorError { active: false } => info!("Sensor error cleared"),
        DispatchOutcome::Unrecognized => warn!("Unrecognized command"),
    }
}
