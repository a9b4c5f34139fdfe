//! Wired UART link
//!
//! The serial line has no connection state of its own. The link tracks the
//! sensor's handshake instead: a `start` line means the sensor booted, the
//! controller then probes until a `sensor` line answers, and a later
//! `start` means the sensor rebooted and the link dropped.

use heapless::Deque;
use rampctl_hal::Uart;
use rampctl_protocol::{classify, HandshakeLine, Line, LineAssembler, LineError, PROBE_MESSAGE};

use super::ConnectionTracker;
use crate::config::TimingConfig;
use crate::traits::{LinkError, LinkEvent, LinkTransport};

/// Lines buffered between two polls
pub const MESSAGE_QUEUE_LEN: usize = 8;

/// Bytes read from the UART per read call
const READ_CHUNK: usize = 32;

/// [`LinkTransport`] over a UART
pub struct UartLink<U> {
    uart: U,
    assembler: LineAssembler,
    messages: Deque<Line, MESSAGE_QUEUE_LEN>,
    tracker: ConnectionTracker,
    started: bool,
    connected: bool,
    probe_due: u16,
    quiet_ticks: u16,
    probe_interval: u16,
    idle_flush: u16,
}

impl<U: Uart> UartLink<U> {
    pub fn new(uart: U, timing: &TimingConfig) -> Self {
        Self {
            uart,
            assembler: LineAssembler::new(),
            messages: Deque::new(),
            tracker: ConnectionTracker::default(),
            started: false,
            connected: false,
            probe_due: 0,
            quiet_ticks: 0,
            probe_interval: timing.probe_interval_ticks.max(1),
            idle_flush: timing.idle_flush_ticks.max(1),
        }
    }

    /// Returns true once the sensor has announced itself
    pub fn sensor_started(&self) -> bool {
        self.started
    }

    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    fn read_input(&mut self) -> Result<bool, LinkError> {
        let mut buf = [0u8; READ_CHUNK];
        let mut received = false;
        let mut result = Ok(());

        loop {
            let n = self
                .uart
                .read_available(&mut buf)
                .map_err(|_| LinkError::Io)?;
            if n == 0 {
                break;
            }
            received = true;

            for &byte in &buf[..n] {
                match self.assembler.feed(byte) {
                    Ok(Some(line)) => keep_first(&mut result, self.handle_line(line)),
                    Ok(None) => {}
                    Err(LineError::Overflow) => keep_first(&mut result, Err(LinkError::Overflow)),
                }
            }
        }

        result.map(|_| received)
    }

    fn flush_idle_line(&mut self, received: bool) -> Result<(), LinkError> {
        if received || !self.assembler.has_partial() {
            self.quiet_ticks = 0;
            return Ok(());
        }

        self.quiet_ticks += 1;
        if self.quiet_ticks < self.idle_flush {
            return Ok(());
        }

        self.quiet_ticks = 0;
        match self.assembler.flush() {
            Some(line) => self.handle_line(line),
            None => Ok(()),
        }
    }

    fn probe(&mut self) -> Result<(), LinkError> {
        if !self.started || self.connected {
            return Ok(());
        }

        if self.probe_due == 0 {
            self.probe_due = self.probe_interval;
            self.send(PROBE_MESSAGE)?;
        }
        self.probe_due -= 1;
        Ok(())
    }

    fn handle_line(&mut self, line: Line) -> Result<(), LinkError> {
        match classify(&line) {
            HandshakeLine::SensorStarted => {
                self.started = true;
                self.probe_due = 0;
                if self.connected {
                    // Lines from the old session are stale
                    self.connected = false;
                    self.messages.clear();
                    self.tracker.link_lost();
                }
                Ok(())
            }
            HandshakeLine::SensorPresent => {
                self.started = true;
                self.connected = true;
                Ok(())
            }
            HandshakeLine::Payload if self.connected => self.push(line),
            // Chatter before the handshake completes
            HandshakeLine::Payload => Ok(()),
        }
    }

    fn push(&mut self, line: Line) -> Result<(), LinkError> {
        self.messages
            .push_back(line)
            .map_err(|_| LinkError::QueueFull)
    }
}

fn keep_first(result: &mut Result<(), LinkError>, next: Result<(), LinkError>) {
    if result.is_ok() {
        *result = next;
    }
}

impl<U: Uart> LinkTransport for UartLink<U> {
    fn service(&mut self) -> Result<(), LinkError> {
        let mut result = Ok(());
        let received = match self.read_input() {
            Ok(received) => received,
            Err(e) => {
                result = Err(e);
                true
            }
        };
        keep_first(&mut result, self.flush_idle_line(received));
        keep_first(&mut result, self.probe());
        result
    }

    fn poll(&mut self) -> Result<Option<LinkEvent>, LinkError> {
        if let Some(event) = self.tracker.next_event(self.connected) {
            return Ok(Some(event));
        }
        Ok(self.messages.pop_front().map(LinkEvent::Message))
    }

    fn send(&mut self, data: &[u8]) -> Result<(), LinkError> {
        self.uart.write_blocking(data).map_err(|_| LinkError::Io)
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockUart;

    fn link() -> UartLink<MockUart> {
        UartLink::new(MockUart::new(), &TimingConfig::default())
    }

    fn drain(link: &mut UartLink<MockUart>) -> std::vec::Vec<LinkEvent> {
        core::iter::from_fn(|| link.poll().unwrap()).collect()
    }

    fn connect(link: &mut UartLink<MockUart>) {
        link.uart.receive(b"start\n");
        link.service().unwrap();
        link.uart.receive(b"mobi-ramp sensor\n");
        link.service().unwrap();
        assert_eq!(drain(link), [LinkEvent::Connected]);
    }

    #[test]
    fn test_silent_until_sensor_starts() {
        let mut link = link();
        for _ in 0..30 {
            link.service().unwrap();
        }
        assert!(link.uart.sent().is_empty());
        assert!(!link.is_connected());
    }

    #[test]
    fn test_probes_after_start() {
        let mut link = link();
        link.uart.receive(b"start\n");
        for _ in 0..25 {
            link.service().unwrap();
        }
        assert!(link.sensor_started());
        // Ticks 0, 10 and 20
        assert_eq!(link.uart.sent(), b"_mobi-ramp\n_mobi-ramp\n_mobi-ramp\n");
        assert!(drain(&mut link).is_empty());
    }

    #[test]
    fn test_handshake_connects() {
        let mut link = link();
        connect(&mut link);
        assert!(link.is_connected());

        // No more probes once connected
        link.uart.clear_sent();
        for _ in 0..20 {
            link.service().unwrap();
        }
        assert!(link.uart.sent().is_empty());
    }

    #[test]
    fn test_presence_without_start_connects() {
        let mut link = link();
        link.uart.receive(b"sensor\n");
        link.service().unwrap();
        assert_eq!(drain(&mut link), [LinkEvent::Connected]);
    }

    #[test]
    fn test_messages_only_when_connected() {
        let mut link = link();
        link.uart.receive(b"00:01\n");
        link.service().unwrap();
        assert!(drain(&mut link).is_empty());

        connect(&mut link);
        link.uart.receive(b"00:01\n99:00\n");
        link.service().unwrap();
        let events = drain(&mut link);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], LinkEvent::Message(Line::from_slice(b"00:01").unwrap()));
        assert_eq!(events[1], LinkEvent::Message(Line::from_slice(b"99:00").unwrap()));
    }

    #[test]
    fn test_presence_lines_ignored_while_connected() {
        let mut link = link();
        connect(&mut link);
        link.uart.receive(b"mobi-ramp sensor\n");
        link.service().unwrap();
        assert!(drain(&mut link).is_empty());
    }

    #[test]
    fn test_restart_disconnects() {
        let mut link = link();
        connect(&mut link);
        link.uart.receive(b"start\n");
        link.service().unwrap();
        assert_eq!(drain(&mut link), [LinkEvent::Disconnected]);
        assert!(!link.is_connected());
        assert!(link.sensor_started());
    }

    #[test]
    fn test_restart_reported_with_full_queue() {
        let mut link = link();
        connect(&mut link);
        for _ in 0..MESSAGE_QUEUE_LEN + 2 {
            link.uart.receive(b"00:01\n");
        }
        link.uart.receive(b"start\n");
        assert_eq!(link.service(), Err(LinkError::QueueFull));

        assert!(!link.is_connected());
        // Queued lines belonged to the dropped session
        assert_eq!(drain(&mut link), [LinkEvent::Disconnected]);
    }

    #[test]
    fn test_restart_and_reconnect_in_one_read() {
        let mut link = link();
        connect(&mut link);
        link.uart.receive(b"00:01\nstart\nsensor\n99:01\n");
        link.service().unwrap();
        assert_eq!(
            drain(&mut link),
            [
                LinkEvent::Disconnected,
                LinkEvent::Connected,
                LinkEvent::Message(Line::from_slice(b"99:01").unwrap()),
            ]
        );
        assert!(link.is_connected());
    }

    #[test]
    fn test_connect_reported_before_messages() {
        let mut link = link();
        link.uart.receive(b"sensor\n00:01\n");
        link.service().unwrap();
        assert_eq!(
            drain(&mut link),
            [
                LinkEvent::Connected,
                LinkEvent::Message(Line::from_slice(b"00:01").unwrap()),
            ]
        );
    }

    #[test]
    fn test_unterminated_line_flushed_when_quiet() {
        let mut link = link();
        connect(&mut link);

        link.uart.receive(b"00:0");
        link.service().unwrap();
        link.uart.receive(b"1");
        link.service().unwrap();
        assert!(drain(&mut link).is_empty());

        link.service().unwrap();
        assert!(drain(&mut link).is_empty());
        link.service().unwrap();
        assert_eq!(
            drain(&mut link),
            [LinkEvent::Message(Line::from_slice(b"00:01").unwrap())]
        );
    }

    #[test]
    fn test_overflow_reported_and_recovered() {
        let mut link = link();
        connect(&mut link);
        link.uart.receive(&[b'x'; 80]);
        assert_eq!(link.service(), Err(LinkError::Overflow));

        link.uart.receive(b"\n99:01\n");
        link.service().unwrap();
        assert_eq!(
            drain(&mut link),
            [LinkEvent::Message(Line::from_slice(b"99:01").unwrap())]
        );
    }

    #[test]
    fn test_read_error_reported() {
        let mut link = link();
        link.uart.fail_next_read();
        assert_eq!(link.service(), Err(LinkError::Io));
        link.service().unwrap();
    }

    #[test]
    fn test_send_passes_through() {
        let mut link = link();
        link.send(b"06: 0\n").unwrap();
        assert_eq!(link.uart.sent(), b"06: 0\n");
    }
}
