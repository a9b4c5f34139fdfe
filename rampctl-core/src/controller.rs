//! Per-tick controller
//!
//! [`RampController::tick`] is the whole control loop. Each tick it:
//!
//! 1. advances the relay state machine
//! 2. services the link and drains its events
//! 3. sends the next configuration parameter if one is due
//! 4. updates the status LEDs
//!
//! Nothing here logs. Everything worth reporting is returned in a
//! [`TickReport`] for the caller to log.

use heapless::Vec;
use rampctl_protocol::{decode, CommandCode, DecodeError, ParamMessage};

use crate::config::{ConfigurationSnapshot, TimingConfig};
use crate::dispatch::dispatch;
use crate::indicator::Indicators;
use crate::session::Session;
use crate::state::{DispatchOutcome, RelayState, RelayTransition};
use crate::traits::{LinkError, LinkEvent, LinkTransport, OutputPort};

/// Most events kept in one [`TickReport`]
pub const MAX_TICK_EVENTS: usize = 16;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    /// Sensor unit connected; broadcast started
    LinkConnected,
    /// Sensor unit disconnected; relay and LEDs reset
    LinkDisconnected,
    /// Relay state machine changed state
    Relay(RelayTransition),
    /// Configuration parameter sent
    ParamSent(ParamMessage),
    /// Configuration parameter could not be sent; the broadcast moves on
    ParamSendFailed { code: CommandCode, error: LinkError },
    /// All parameters sent, commands are now accepted
    SessionReady,
    /// Command applied
    Dispatched(DispatchOutcome),
    /// Inbound line was not a command
    DecodeFailed(DecodeError),
    /// Inbound line arrived before the session was ready
    MessageDropped,
    /// Link reported an error
    LinkFault(LinkError),
}

/// Events from one tick
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    events: Vec<ControllerEvent, MAX_TICK_EVENTS>,
    overflowed: u16,
}

impl TickReport {
    pub fn events(&self) -> &[ControllerEvent] {
        &self.events
    }

    /// Events that did not fit in the report
    pub fn overflowed(&self) -> u16 {
        self.overflowed
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.overflowed == 0
    }

    fn push(&mut self, event: ControllerEvent) {
        if self.events.push(event).is_err() {
            self.overflowed = self.overflowed.saturating_add(1);
        }
    }
}

/// The ramp controller
pub struct RampController {
    config: ConfigurationSnapshot,
    relay: RelayState,
    session: Session,
    indicators: Indicators,
}

impl RampController {
    pub fn new(config: ConfigurationSnapshot, timing: TimingConfig) -> Self {
        Self {
            config,
            relay: RelayState::new(timing.ticks_per_second),
            session: Session::new(timing.broadcast_spacing_ticks),
            indicators: Indicators::new(&timing),
        }
    }

    pub fn config(&self) -> &ConfigurationSnapshot {
        &self.config
    }

    pub fn relay(&self) -> &RelayState {
        &self.relay
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one control tick
    pub fn tick<L, O>(&mut self, link: &mut L, outputs: &mut O) -> TickReport
    where
        L: LinkTransport,
        O: OutputPort,
    {
        let mut report = TickReport::default();

        if let Some(transition) = self.relay.advance(outputs) {
            report.push(ControllerEvent::Relay(transition));
        }

        if let Err(e) = link.service() {
            report.push(ControllerEvent::LinkFault(e));
        }

        loop {
            match link.poll() {
                Ok(Some(event)) => self.handle_link_event(event, outputs, &mut report),
                Ok(None) => break,
                Err(e) => {
                    report.push(ControllerEvent::LinkFault(e));
                    break;
                }
            }
        }

        if let Some(msg) = self.session.poll_broadcast(&self.config) {
            match link.send(msg.encode().as_bytes()) {
                Ok(()) => report.push(ControllerEvent::ParamSent(msg)),
                Err(error) => report.push(ControllerEvent::ParamSendFailed {
                    code: msg.code,
                    error,
                }),
            }
            if self.session.is_ready() {
                report.push(ControllerEvent::SessionReady);
            }
        }

        self.indicators.update(
            self.session.is_connected(),
            self.config.sensor_error_active,
            outputs,
        );

        report
    }

    fn handle_link_event<O: OutputPort>(
        &mut self,
        event: LinkEvent,
        outputs: &mut O,
        report: &mut TickReport,
    ) {
        match event {
            LinkEvent::Connected => {
                self.config.sensor_error_active = false;
                self.session.on_connected();
                report.push(ControllerEvent::LinkConnected);
            }
            LinkEvent::Disconnected => {
                self.config.sensor_error_active = false;
                self.session.on_disconnected();
                self.relay.reset(outputs);
                outputs.all_low();
                self.indicators.invalidate();
                report.push(ControllerEvent::LinkDisconnected);
            }
            LinkEvent::Message(_) if !self.session.is_ready() => {
                report.push(ControllerEvent::MessageDropped);
            }
            LinkEvent::Message(line) => match decode(&line) {
                Ok(cmd) => {
                    let outcome = dispatch(&cmd, &mut self.config, &mut self.relay, outputs);
                    report.push(ControllerEvent::Dispatched(outcome));
                }
                Err(e) => report.push(ControllerEvent::DecodeFailed(e)),
            },
        }
    }
}
