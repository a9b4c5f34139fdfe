//! Discrete outputs driven by the controller

use rampctl_hal::OutputPin;

/// The four outputs the controller owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputId {
    /// Beacon or barrier relay coil
    Relay,
    /// LED mirroring the relay
    RelayIndicator,
    /// Sensor fault LED
    ErrorLed,
    /// Power / link status LED
    PowerLed,
}

impl OutputId {
    pub const ALL: [OutputId; 4] = [
        OutputId::Relay,
        OutputId::RelayIndicator,
        OutputId::ErrorLed,
        OutputId::PowerLed,
    ];
}

/// Logic level of an output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    High,
    Low,
}

impl Level {
    pub fn from_bool(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

/// Output sink for the controller
pub trait OutputPort {
    /// Drive one output to a level
    fn set_output(&mut self, id: OutputId, level: Level);

    /// Drive the relay and its indicator together
    fn drive_relay(&mut self, level: Level) {
        self.set_output(OutputId::Relay, level);
        self.set_output(OutputId::RelayIndicator, level);
    }

    /// Drive every output Low
    fn all_low(&mut self) {
        for id in OutputId::ALL {
            self.set_output(id, Level::Low);
        }
    }
}

/// [`OutputPort`] over four GPIO pins
pub struct PinOutputs<R, I, E, P> {
    pub relay: R,
    pub relay_indicator: I,
    pub error_led: E,
    pub power_led: P,
}

impl<R, I, E, P> PinOutputs<R, I, E, P>
where
    R: OutputPin,
    I: OutputPin,
    E: OutputPin,
    P: OutputPin,
{
    /// Take ownership of the pins and drive them all Low
    pub fn new(relay: R, relay_indicator: I, error_led: E, power_led: P) -> Self {
        let mut outputs = Self {
            relay,
            relay_indicator,
            error_led,
            power_led,
        };
        outputs.all_low();
        outputs
    }
}

impl<R, I, E, P> OutputPort for PinOutputs<R, I, E, P>
where
    R: OutputPin,
    I: OutputPin,
    E: OutputPin,
    P: OutputPin,
{
    fn set_output(&mut self, id: OutputId, level: Level) {
        let high = level.is_high();
        match id {
            OutputId::Relay => self.relay.set_state(high),
            OutputId::RelayIndicator => self.relay_indicator.set_state(high),
            OutputId::ErrorLed => self.error_led.set_state(high),
            OutputId::PowerLed => self.power_led.set_state(high),
        }
    }
}
