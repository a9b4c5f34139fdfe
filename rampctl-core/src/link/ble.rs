//! BLE link over the Nordic UART Service
//!
//! The BLE stack runs its callbacks outside the controller task. It holds
//! the [`BleEndpoint`] half and pushes notification payloads into
//! single-producer/single-consumer queues. The connection state lives in
//! atomics next to the queues. The controller holds the [`BleLink`] half and
//! drains both once per tick.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use heapless::spsc::{Consumer, Producer, Queue};
use rampctl_protocol::{Line, LineAssembler, LineError};

use super::ConnectionTracker;
use crate::traits::{LinkError, LinkEvent, LinkTransport};

/// Nordic UART Service
pub const NUS_SERVICE_UUID: &str = "6e400001-b5a3-f393-e0a9-e50e24dcca9e";

/// Characteristic the controller writes to
pub const NUS_RX_CHARACTERISTIC_UUID: &str = "6e400002-b5a3-f393-e0a9-e50e24dcca9e";

/// Characteristic the sensor notifies on
pub const NUS_TX_CHARACTERISTIC_UUID: &str = "6e400003-b5a3-f393-e0a9-e50e24dcca9e";

/// Advertised name of the paired sensor unit
pub const SENSOR_PEER_NAME: &str = "[intervoid]mobi-ramp_01";

/// Queue depth; one slot is reserved by the queue implementation
pub const BLE_QUEUE_LEN: usize = 8;

/// Decide whether a scan result is the sensor unit to connect to
pub fn matches_peer(name: &str, advertises_nus: bool) -> bool {
    advertises_nus && name == SENSOR_PEER_NAME
}

/// Backing storage for both directions of the BLE link
pub struct BleQueues {
    inbound: Queue<Line, BLE_QUEUE_LEN>,
    outbound: Queue<Line, BLE_QUEUE_LEN>,
    link_up: AtomicBool,
    disconnects: AtomicU32,
}

impl Default for BleQueues {
    fn default() -> Self {
        Self::new()
    }
}

impl BleQueues {
    pub const fn new() -> Self {
        Self {
            inbound: Queue::new(),
            outbound: Queue::new(),
            link_up: AtomicBool::new(false),
            disconnects: AtomicU32::new(0),
        }
    }

    /// Split into the controller side and the BLE stack side
    pub fn split(&mut self) -> (BleLink<'_>, BleEndpoint<'_>) {
        let Self {
            inbound,
            outbound,
            link_up,
            disconnects,
        } = self;
        let (link_up, disconnects) = (&*link_up, &*disconnects);
        let (line_tx, line_rx) = inbound.split();
        let (write_tx, write_rx) = outbound.split();
        let seen_disconnects = disconnects.load(Ordering::Acquire);
        (
            BleLink {
                inbound: line_rx,
                outbound: write_tx,
                link_up,
                disconnects,
                seen_disconnects,
                tracker: ConnectionTracker::default(),
            },
            BleEndpoint {
                inbound: line_tx,
                outbound: write_rx,
                link_up,
                disconnects,
                assembler: LineAssembler::new(),
            },
        )
    }
}

/// Controller side of the BLE link
pub struct BleLink<'a> {
    inbound: Consumer<'a, Line, BLE_QUEUE_LEN>,
    outbound: Producer<'a, Line, BLE_QUEUE_LEN>,
    link_up: &'a AtomicBool,
    disconnects: &'a AtomicU32,
    seen_disconnects: u32,
    tracker: ConnectionTracker,
}

impl LinkTransport for BleLink<'_> {
    fn poll(&mut self) -> Result<Option<LinkEvent>, LinkError> {
        let disconnects = self.disconnects.load(Ordering::Acquire);
        if disconnects != self.seen_disconnects {
            self.seen_disconnects = disconnects;
            self.tracker.link_lost();
            // Lines from the dropped session
            while self.inbound.dequeue().is_some() {}
        }

        if let Some(event) = self.tracker.next_event(self.link_up.load(Ordering::Acquire)) {
            return Ok(Some(event));
        }
        Ok(self.inbound.dequeue().map(LinkEvent::Message))
    }

    fn send(&mut self, data: &[u8]) -> Result<(), LinkError> {
        let line = Line::from_slice(data).map_err(|_| LinkError::Overflow)?;
        self.outbound
            .enqueue(line)
            .map_err(|_| LinkError::QueueFull)
    }

    fn is_connected(&self) -> bool {
        self.link_up.load(Ordering::Acquire)
    }
}

/// BLE stack side of the link
pub struct BleEndpoint<'a> {
    inbound: Producer<'a, Line, BLE_QUEUE_LEN>,
    outbound: Consumer<'a, Line, BLE_QUEUE_LEN>,
    link_up: &'a AtomicBool,
    disconnects: &'a AtomicU32,
    assembler: LineAssembler,
}

impl BleEndpoint<'_> {
    /// The GATT client connected to the sensor
    pub fn on_connect(&mut self) {
        self.assembler.reset();
        self.link_up.store(true, Ordering::Release);
    }

    /// The GATT client lost the sensor
    pub fn on_disconnect(&mut self) {
        self.assembler.reset();
        while self.outbound.dequeue().is_some() {}
        self.link_up.store(false, Ordering::Release);
        // Only this side writes the counter, so load/store is enough
        let count = self.disconnects.load(Ordering::Relaxed).wrapping_add(1);
        self.disconnects.store(count, Ordering::Release);
    }

    /// A notification arrived on the TX characteristic
    ///
    /// Each notification carries whole messages; a missing final
    /// terminator is implied.
    pub fn on_notify(&mut self, data: &[u8]) -> Result<(), LinkError> {
        let mut result = Ok(());
        for &byte in data {
            let step = match self.assembler.feed(byte) {
                Ok(Some(line)) => self.enqueue(line),
                Ok(None) => Ok(()),
                Err(LineError::Overflow) => Err(LinkError::Overflow),
            };
            if result.is_ok() {
                result = step;
            }
        }
        if let Some(line) = self.assembler.flush() {
            let step = self.enqueue(line);
            if result.is_ok() {
                result = step;
            }
        }
        result
    }

    /// Next line to write to the RX characteristic
    pub fn take_write(&mut self) -> Option<Line> {
        self.outbound.dequeue()
    }

    fn enqueue(&mut self, line: Line) -> Result<(), LinkError> {
        self.inbound
            .enqueue(line)
            .map_err(|_| LinkError::QueueFull)
    }
}
