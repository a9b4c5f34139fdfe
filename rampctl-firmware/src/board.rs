//! Board wiring
//!
//! Pin assignment for the ramp controller board:
//!
//! | Function                  | GPIO        |
//! |---------------------------|-------------|
//! | Sensor UART TX / RX       | 0 / 1       |
//! | Operation mode switches   | 2 (bit 0), 3 (bit 1) |
//! | Direction switch          | 4           |
//! | Relay timing switch       | 5           |
//! | Direction category        | 6 (bit 0), 7 (bit 1) |
//! | Sensitivity switches      | 8 (bit 0), 9 (bit 1) |
//! | Error LED                 | 13          |
//! | Relay indicator LED       | 14          |
//! | Relay                     | 15          |
//! | Power LED                 | 25          |
//! | Relay timer pot (ADC0)    | 26          |
//! | Sensitivity pot (ADC1)    | 27          |

use embassy_rp::adc::{Adc, Blocking, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::Peripherals;

use rampctl_core::inputs::DipSwitches;
use rampctl_core::link::UartLink;
use rampctl_core::traits::PinOutputs;
use rampctl_hal_rp2040::{RpInput, RpOutput, RpUart};

bind_interrupts!(pub struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Sensor link baud rate
pub const SENSOR_BAUDRATE: u32 = 115_200;

/// Size of each UART ring buffer
pub const UART_BUF_LEN: usize = 256;

pub type Outputs = PinOutputs<RpOutput<'static>, RpOutput<'static>, RpOutput<'static>, RpOutput<'static>>;
pub type SensorLink = UartLink<RpUart>;

/// Peripherals wired up for the controller
pub struct Board {
    pub switches: DipSwitches<RpInput<'static>>,
    pub outputs: Outputs,
    pub uart: RpUart,
    pub adc: Adc<'static, Blocking>,
    pub relay_pot: Channel<'static>,
    pub sensitivity_pot: Channel<'static>,
}

impl Board {
    pub fn new(
        p: Peripherals,
        tx_buf: &'static mut [u8; UART_BUF_LEN],
        rx_buf: &'static mut [u8; UART_BUF_LEN],
    ) -> Self {
        // DIP switches short to ground when ON
        let switches = DipSwitches {
            operation_mode: [
                RpInput::new(Input::new(p.PIN_2, Pull::Up)),
                RpInput::new(Input::new(p.PIN_3, Pull::Up)),
            ],
            direction: RpInput::new(Input::new(p.PIN_4, Pull::Up)),
            relay_timing: RpInput::new(Input::new(p.PIN_5, Pull::Up)),
            direction_category: [
                RpInput::new(Input::new(p.PIN_6, Pull::Up)),
                RpInput::new(Input::new(p.PIN_7, Pull::Up)),
            ],
            sensitivity: [
                RpInput::new(Input::new(p.PIN_8, Pull::Up)),
                RpInput::new(Input::new(p.PIN_9, Pull::Up)),
            ],
        };

        let outputs = PinOutputs::new(
            RpOutput::new(Output::new(p.PIN_15, Level::Low)),
            RpOutput::new(Output::new(p.PIN_14, Level::Low)),
            RpOutput::new(Output::new(p.PIN_13, Level::Low)),
            RpOutput::new(Output::new(p.PIN_25, Level::Low)),
        );

        let mut uart_config = UartConfig::default();
        uart_config.baudrate = SENSOR_BAUDRATE;
        let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
        let uart = RpUart::new(uart.into_buffered(Irqs, tx_buf, rx_buf));

        let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
        let relay_pot = Channel::new_pin(p.PIN_26, Pull::None);
        let sensitivity_pot = Channel::new_pin(p.PIN_27, Pull::None);

        Self {
            switches,
            outputs,
            uart,
            adc,
            relay_pot,
            sensitivity_pot,
        }
    }
}
