//! Seams between the controller logic and its collaborators
//!
//! The controller drives four discrete outputs and talks to the sensor
//! unit through a link transport. Both are traits so the logic runs
//! unchanged against real pins, a BLE stack or test doubles.

pub mod link;
pub mod output;

pub use link::{LinkError, LinkEvent, LinkTransport};
pub use output::{Level, OutputId, OutputPort, PinOutputs};
