//! rampctl - Ramp Controller Firmware
//!
//! Main firmware binary for RP2040-based ramp controller boards. Samples
//! the DIP switches and potentiometers once at boot, then drives the
//! beacon/barrier relay from vehicle reports sent by the sensor unit.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rampctl_core::config::{ConfigurationSnapshot, TimingConfig};
use rampctl_core::inputs::read_configuration_inputs;
use rampctl_core::link::UartLink;
use rampctl_core::RampController;
use rampctl_hal_rp2040::RpAnalogChannel;

use crate::board::{Board, UART_BUF_LEN};

mod board;
mod tasks;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; UART_BUF_LEN]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_BUF_LEN]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("rampctl firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let Board {
        switches,
        outputs,
        uart,
        adc,
        relay_pot,
        sensitivity_pot,
    } = Board::new(p, TX_BUF.init([0u8; UART_BUF_LEN]), RX_BUF.init([0u8; UART_BUF_LEN]));
    info!("Peripherals initialized");

    // Configuration is fixed until the next power cycle
    let config = {
        let adc = RefCell::new(adc);
        let mut relay_pot = RpAnalogChannel::new(&adc, relay_pot);
        let mut sensitivity_pot = RpAnalogChannel::new(&adc, sensitivity_pot);

        let sample = read_configuration_inputs(&switches, &mut relay_pot, &mut sensitivity_pot);
        for e in &sample.errors {
            warn!("Potentiometer read failed: {:?}, using zero reading", e);
        }
        let inputs = sample.inputs;
        debug!("Configuration inputs: {:?}", inputs);
        debug!("Sensitivity pot: {}", inputs.raw_sensitivity_adc);

        ConfigurationSnapshot::from_inputs(&inputs)
    };
    info!(
        "Mode {:?}, direction {:?}, relay {:?} for {} s",
        config.operation_mode,
        config.direction,
        config.relay_timing_edge,
        config.relay_timer_seconds
    );
    info!(
        "Sensitivity {}, direction category {}",
        config.sensitivity_level, config.direction_category
    );

    let timing = TimingConfig::default();
    let link = UartLink::new(uart, &timing);
    let controller = RampController::new(config, timing);

    // Spawn tasks
    spawner.spawn(tasks::tick_task(timing.tick_interval_ms())).unwrap();
    spawner
        .spawn(tasks::controller_task(controller, link, outputs))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
