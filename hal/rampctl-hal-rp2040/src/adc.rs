//! ADC access for the potentiometers
//!
//! The RP2040 has a single converter (ADC0-3 on GPIO26-29). Both
//! potentiometers share it, so each channel borrows it through a `RefCell`
//! for the duration of a read.

use core::cell::RefCell;

use embassy_rp::adc::{Adc, Blocking, Channel};
use rampctl_hal::AnalogInput;

/// Errors from a potentiometer read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcReadError {
    /// The converter is borrowed by another read
    Busy,
    /// The conversion reported an error
    Conversion,
}

/// One analog pin on the shared blocking ADC
pub struct RpAnalogChannel<'a, 'd> {
    adc: &'a RefCell<Adc<'d, Blocking>>,
    channel: Channel<'d>,
}

impl<'a, 'd> RpAnalogChannel<'a, 'd> {
    pub fn new(adc: &'a RefCell<Adc<'d, Blocking>>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for RpAnalogChannel<'_, '_> {
    type Error = AdcReadError;

    fn read_raw(&mut self) -> Result<u16, AdcReadError> {
        let mut adc = self.adc.try_borrow_mut().map_err(|_| AdcReadError::Busy)?;
        adc.blocking_read(&mut self.channel)
            .map_err(|_| AdcReadError::Conversion)
    }
}
