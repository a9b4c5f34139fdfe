//! Configuration types
//!
//! The session configuration is sampled once at boot from DIP switches and
//! potentiometers and stays fixed until the next power cycle. Timing
//! constants for the control loop live in [`TimingConfig`].

pub mod snapshot;
pub mod tables;
pub mod timing;

pub use snapshot::{ConfigurationSnapshot, Direction, OperationMode, RelayTimingEdge};
pub use tables::{relay_timer_seconds, RELAY_TIMER_BOUNDARIES, RELAY_TIMER_SECONDS};
pub use timing::TimingConfig;
