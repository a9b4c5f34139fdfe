//! Ramp Controller Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the controller logic is written
//! against. Chip-specific crates implement them, and host tests implement
//! them with plain structs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  rampctl-firmware / rampctl-core        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rampctl-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ rampctl-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Relay, LEDs and DIP switches
//! - [`uart::UartTx`], [`uart::UartRx`] - Sensor link serial port
//! - [`adc::AnalogInput`] - Potentiometer sampling

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{InputPin, OutputPin};
pub use uart::{Uart, UartError, UartRx, UartTx};
