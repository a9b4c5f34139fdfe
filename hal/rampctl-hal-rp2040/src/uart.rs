//! Buffered UART adapter
//!
//! The interrupt-driven ring buffers of `BufferedUart` let the control
//! loop pick up received bytes once per tick without waiting.

use embassy_rp::uart::{BufferedUart, Error};
use embedded_io::{Read, ReadReady, Write};
use rampctl_hal::{UartError, UartRx, UartTx};

/// Sensor link UART
pub struct RpUart {
    uart: BufferedUart,
}

impl RpUart {
    pub fn new(uart: BufferedUart) -> Self {
        Self { uart }
    }
}

fn map_error(e: Error) -> UartError {
    match e {
        Error::Overrun => UartError::Overrun,
        Error::Break => UartError::Break,
        Error::Parity => UartError::Parity,
        Error::Framing => UartError::Framing,
        #[allow(unreachable_patterns)]
        _ => UartError::Other,
    }
}

impl UartTx for RpUart {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError> {
        self.uart.write_all(data).map_err(map_error)
    }

    fn flush(&mut self) -> Result<(), UartError> {
        Write::flush(&mut self.uart).map_err(map_error)
    }
}

impl UartRx for RpUart {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, UartError> {
        if buf.is_empty() || !self.uart.read_ready().map_err(map_error)? {
            return Ok(0);
        }
        self.uart.read(buf).map_err(map_error)
    }
}
