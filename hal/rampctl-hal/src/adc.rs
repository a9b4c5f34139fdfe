//! Analog input abstraction
//!
//! The controller samples its potentiometers once at boot, so a blocking
//! single-shot read is all that is needed.

/// Full-scale value of a 12-bit conversion
pub const ADC_MAX: u16 = 4095;

/// Single analog channel
pub trait AnalogInput {
    /// Error type for conversions
    type Error;

    /// Perform one conversion and return the raw 12-bit result
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}
