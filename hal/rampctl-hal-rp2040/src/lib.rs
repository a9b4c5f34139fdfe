//! RP2040-specific HAL for the ramp controller firmware
//!
//! This crate implements the shared `rampctl-hal` traits on top of
//! `embassy-rp`:
//!
//! - GPIO outputs (relay, LEDs) and pulled-up DIP switch inputs
//! - Buffered UART to the sensor unit, read without blocking
//! - Blocking single-shot ADC reads for the potentiometers

#![no_std]

pub mod adc;
pub mod gpio;
pub mod uart;

pub use adc::{AdcReadError, RpAnalogChannel};
pub use gpio::{RpInput, RpOutput};
pub use uart::RpUart;
