//! Link session with the sensor unit
//!
//! Every connect starts a fresh session: the controller pushes its five
//! configuration parameters, one per broadcast spacing, and only then
//! accepts commands from the sensor.

use rampctl_protocol::{ParamMessage, BROADCAST_ORDER};

use crate::config::ConfigurationSnapshot;

/// Broadcast progress and ready latch for one connection
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    connected: bool,
    ready: bool,
    /// Index into [`BROADCAST_ORDER`] of the next message
    next: usize,
    /// Ticks until the next message is due
    due_in: u16,
    spacing: u16,
}

impl Session {
    pub fn new(broadcast_spacing_ticks: u16) -> Self {
        Self {
            connected: false,
            ready: false,
            next: 0,
            due_in: 0,
            spacing: broadcast_spacing_ticks.max(1),
        }
    }

    /// Start a new broadcast sequence
    pub fn on_connected(&mut self) {
        self.connected = true;
        self.ready = false;
        self.next = 0;
        self.due_in = self.spacing;
    }

    /// Drop the ready latch and any broadcast in progress
    pub fn on_disconnected(&mut self) {
        self.connected = false;
        self.ready = false;
        self.next = 0;
        self.due_in = 0;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Returns true once all parameters have gone out
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Messages still to send in this sequence
    pub fn remaining(&self) -> usize {
        if self.connected {
            BROADCAST_ORDER.len() - self.next
        } else {
            0
        }
    }

    /// Called once per tick; returns the parameter to send when one is due
    ///
    /// The connect tick counts as the first tick of the initial wait. The
    /// ready latch is set as the last message is handed out.
    pub fn poll_broadcast(&mut self, config: &ConfigurationSnapshot) -> Option<ParamMessage> {
        if !self.connected || self.ready {
            return None;
        }

        self.due_in = self.due_in.saturating_sub(1);
        if self.due_in > 0 {
            return None;
        }

        let code = BROADCAST_ORDER[self.next];
        self.next += 1;
        self.due_in = self.spacing;
        if self.next == BROADCAST_ORDER.len() {
            self.ready = true;
        }

        Some(ParamMessage::new(code, config.broadcast_value(code).unwrap_or(0)))
    }
}
