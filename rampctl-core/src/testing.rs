//! Host-side doubles for the hardware traits

use std::collections::VecDeque;
use std::vec::Vec;

use rampctl_hal::{AnalogInput, InputPin, OutputPin, UartError, UartRx, UartTx};

use crate::traits::{Level, OutputId, OutputPort};

/// Output recorder
#[derive(Debug, Default)]
pub struct MockOutputs {
    levels: [Option<Level>; 4],
    writes: Vec<(OutputId, Level)>,
}

impl MockOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level, Low if never written
    pub fn level(&self, id: OutputId) -> Level {
        self.levels[index(id)].unwrap_or(Level::Low)
    }

    pub fn writes(&self) -> &[(OutputId, Level)] {
        &self.writes
    }

    pub fn writes_to(&self, id: OutputId) -> usize {
        self.writes.iter().filter(|(w, _)| *w == id).count()
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

fn index(id: OutputId) -> usize {
    match id {
        OutputId::Relay => 0,
        OutputId::RelayIndicator => 1,
        OutputId::ErrorLed => 2,
        OutputId::PowerLed => 3,
    }
}

impl OutputPort for MockOutputs {
    fn set_output(&mut self, id: OutputId, level: Level) {
        self.levels[index(id)] = Some(level);
        self.writes.push((id, level));
    }
}

/// GPIO double usable as input or output
#[derive(Debug, Clone, Copy)]
pub struct MockPin {
    high: bool,
}

impl MockPin {
    pub fn high() -> Self {
        Self { high: true }
    }

    pub fn low() -> Self {
        Self { high: false }
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

impl InputPin for MockPin {
    fn is_high(&self) -> bool {
        self.high
    }
}

/// ADC channel returning a fixed result
pub struct MockAdc {
    reading: Result<u16, ()>,
}

impl MockAdc {
    pub fn new(reading: Result<u16, ()>) -> Self {
        Self { reading }
    }
}

impl AnalogInput for MockAdc {
    type Error = ();

    fn read_raw(&mut self) -> Result<u16, ()> {
        self.reading
    }
}

/// UART loopback: tests queue bytes to receive and inspect what was sent
#[derive(Debug, Default)]
pub struct MockUart {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    fail_read: bool,
    fail_write: bool,
}

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receive(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    pub fn sent(&self) -> &[u8] {
        &self.tx
    }

    pub fn clear_sent(&mut self) {
        self.tx.clear();
    }

    pub fn fail_next_read(&mut self) {
        self.fail_read = true;
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_write = fail;
    }
}

impl UartTx for MockUart {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), UartError> {
        if self.fail_write {
            return Err(UartError::Other);
        }
        self.tx.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), UartError> {
        Ok(())
    }
}

impl UartRx for MockUart {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, UartError> {
        if core::mem::take(&mut self.fail_read) {
            return Err(UartError::Overrun);
        }
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}
