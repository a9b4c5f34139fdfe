//! Board-agnostic core logic for the ramp controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Configuration snapshot sampled from DIP switches and potentiometers
//! - Relay hold state machine and vehicle queue
//! - Command dispatch per operation mode
//! - Link session with the configuration broadcast and ready latch
//! - UART and BLE link transports
//! - Status LED blinking
//! - The per-tick controller tying it together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod indicator;
pub mod inputs;
pub mod link;
pub mod session;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ControllerEvent, RampController, TickReport};
