//! Relay countdown and vehicle queue

use super::events::RelayTransition;
use crate::traits::{Level, OutputPort};

/// Coarse phase of the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayPhase {
    /// Relay off, no countdown
    Idle,
    /// Relay energized for a timed hold
    Holding,
}

/// Timing state of the relay
///
/// Invariants: while `energized` the relay and its indicator are driven
/// High, and a non-zero countdown is only ever present while energized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayState {
    countdown_ticks: u32,
    energized: bool,
    vehicle_queue: u16,
    ticks_per_second: u16,
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new(10)
    }
}

impl RelayState {
    /// Create an idle relay running at `ticks_per_second`
    pub fn new(ticks_per_second: u16) -> Self {
        Self {
            countdown_ticks: 0,
            energized: false,
            vehicle_queue: 0,
            ticks_per_second,
        }
    }

    pub fn countdown_ticks(&self) -> u32 {
        self.countdown_ticks
    }

    pub fn is_energized(&self) -> bool {
        self.energized
    }

    pub fn vehicle_queue(&self) -> u16 {
        self.vehicle_queue
    }

    pub fn ticks_per_second(&self) -> u16 {
        self.ticks_per_second
    }

    pub fn phase(&self) -> RelayPhase {
        if self.energized {
            RelayPhase::Holding
        } else {
            RelayPhase::Idle
        }
    }

    /// Start (or restart) a timed hold
    ///
    /// A zero duration only resets the countdown and leaves the relay as
    /// it is. Returns the hold length in ticks.
    pub fn arm_hold<O: OutputPort>(&mut self, seconds: u8, outputs: &mut O) -> u32 {
        self.countdown_ticks = u32::from(seconds) * u32::from(self.ticks_per_second);
        if self.countdown_ticks > 0 {
            self.energize(outputs);
        }
        self.countdown_ticks
    }

    /// Queue one vehicle for a one-second pulse
    pub fn enqueue_vehicle(&mut self) -> u16 {
        self.vehicle_queue = self.vehicle_queue.saturating_add(1);
        self.vehicle_queue
    }

    /// Advance the relay by one control tick
    pub fn advance<O: OutputPort>(&mut self, outputs: &mut O) -> Option<RelayTransition> {
        match (self.countdown_ticks, self.energized) {
            (0, false) if self.vehicle_queue > 0 => {
                self.countdown_ticks = u32::from(self.ticks_per_second);
                self.energize(outputs);
                Some(RelayTransition::Energized {
                    ticks: self.countdown_ticks,
                    queued: self.vehicle_queue,
                })
            }
            (0, false) => None,
            (0, true) => Some(self.release(outputs)),
            (_, _) => {
                self.countdown_ticks -= 1;
                if self.countdown_ticks == 0 && self.energized {
                    Some(self.release(outputs))
                } else {
                    None
                }
            }
        }
    }

    /// Cancel any hold and forget queued vehicles
    pub fn reset<O: OutputPort>(&mut self, outputs: &mut O) {
        self.countdown_ticks = 0;
        self.energized = false;
        self.vehicle_queue = 0;
        outputs.drive_relay(Level::Low);
    }

    fn energize<O: OutputPort>(&mut self, outputs: &mut O) {
        self.energized = true;
        outputs.drive_relay(Level::High);
    }

    fn release<O: OutputPort>(&mut self, outputs: &mut O) -> RelayTransition {
        self.countdown_ticks = 0;
        self.energized = false;
        self.vehicle_queue = self.vehicle_queue.saturating_sub(1);
        outputs.drive_relay(Level::Low);
        RelayTransition::Released {
            queued: self.vehicle_queue,
        }
    }
}
