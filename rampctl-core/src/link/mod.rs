//! Link transports to the sensor unit
//!
//! - [`UartLink`] - wired serial link with a presence handshake
//! - [`BleLink`] - Nordic UART Service link fed from the BLE stack
//!
//! Connection changes are tracked outside the bounded message queues, so a
//! backlog of lines can never hide a connect or disconnect.

pub mod ble;
pub mod uart;

pub use ble::{matches_peer, BleEndpoint, BleLink, BleQueues};
pub use uart::UartLink;

use crate::traits::LinkEvent;

/// Connection state as last reported through `poll`
///
/// A drop is always reported, even when the link came back before the
/// controller polled.
#[derive(Debug, Default)]
struct ConnectionTracker {
    reported: bool,
    lost: bool,
}

impl ConnectionTracker {
    /// The link went down
    fn link_lost(&mut self) {
        if self.reported {
            self.lost = true;
        }
    }

    /// Next lifecycle event to hand out, given the link's current state
    fn next_event(&mut self, connected: bool) -> Option<LinkEvent> {
        if self.lost {
            self.lost = false;
            self.reported = false;
            return Some(LinkEvent::Disconnected);
        }

        if connected == self.reported {
            return None;
        }
        self.reported = connected;
        Some(if connected {
            LinkEvent::Connected
        } else {
            LinkEvent::Disconnected
        })
    }
}
