//! UART serial communication abstractions
//!
//! The sensor link is polled once per control tick, so receive is
//! non-blocking: it returns whatever bytes are already buffered.

/// Errors reported by UART implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Framing error
    Framing,
    /// Receive overrun, bytes were lost
    Overrun,
    /// Parity error
    Parity,
    /// Line break detected
    Break,
    /// Other error
    Other,
}

/// UART transmitter
pub trait UartTx {
    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), UartError>;
}

/// UART receiver
pub trait UartRx {
    /// Read bytes that have already arrived
    ///
    /// Never waits. Returns `Ok(0)` when nothing is buffered.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, UartError>;
}

/// Combined UART interface
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}
