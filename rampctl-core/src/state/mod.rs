//! Relay hold state machine
//!
//! Owns the relay timing. The dispatcher arms holds and queues vehicles;
//! [`RelayState::advance`] runs once per control tick and is the only
//! place a timed hold ends.

pub mod events;
pub mod relay;

pub use events::{DispatchOutcome, RelayTransition};
pub use relay::{RelayPhase, RelayState};
