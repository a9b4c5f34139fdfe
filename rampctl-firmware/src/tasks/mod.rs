//! Embassy async tasks
//!
//! The tick task paces the control loop; the controller task owns all
//! controller state, the sensor link and the outputs.

pub mod controller;
pub mod tick;

pub use controller::controller_task;
pub use tick::tick_task;
