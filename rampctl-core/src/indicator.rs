//! Status LEDs
//!
//! The power LED shows the link: solid while connected, blinking while
//! waiting for the sensor. The error LED blinks while a connected sensor
//! reports a fault.

use crate::config::TimingConfig;
use crate::traits::{Level, OutputId, OutputPort};

/// Square-wave generator advanced once per tick
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blinker {
    half_period: u16,
    phase: u16,
    on: bool,
}

impl Blinker {
    pub fn new(half_period: u16) -> Self {
        Self {
            half_period: half_period.max(1),
            phase: 0,
            on: false,
        }
    }

    /// Advance one tick and return whether the LED should be lit
    ///
    /// The first tick after a reset lights the LED.
    pub fn tick(&mut self) -> bool {
        if self.phase == 0 {
            self.on = !self.on;
        }
        self.phase = (self.phase + 1) % self.half_period;
        self.on
    }

    pub fn reset(&mut self) {
        self.phase = 0;
        self.on = false;
    }
}

/// Drives the power and error LEDs
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicators {
    power: Blinker,
    error: Blinker,
    power_level: Option<Level>,
    error_level: Option<Level>,
}

impl Indicators {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            power: Blinker::new(timing.power_blink_half_period),
            error: Blinker::new(timing.error_blink_half_period),
            power_level: None,
            error_level: None,
        }
    }

    /// Update both LEDs for this tick
    ///
    /// Outputs are only written when their level changes.
    pub fn update<O: OutputPort>(&mut self, connected: bool, sensor_error: bool, outputs: &mut O) {
        let power = if connected {
            self.power.reset();
            Level::High
        } else {
            Level::from_bool(self.power.tick())
        };

        let error = if connected && sensor_error {
            Level::from_bool(self.error.tick())
        } else {
            self.error.reset();
            Level::Low
        };

        Self::drive(&mut self.power_level, OutputId::PowerLed, power, outputs);
        Self::drive(&mut self.error_level, OutputId::ErrorLed, error, outputs);
    }

    /// Forget the last driven levels after something else wrote the LEDs
    pub fn invalidate(&mut self) {
        self.power_level = None;
        self.error_level = None;
    }

    fn drive<O: OutputPort>(last: &mut Option<Level>, id: OutputId, level: Level, outputs: &mut O) {
        if *last != Some(level) {
            outputs.set_output(id, level);
            *last = Some(level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockOutputs;

    #[test]
    fn test_blinker_half_period() {
        let mut blinker = Blinker::new(3);
        let pattern: std::vec::Vec<bool> = (0..12).map(|_| blinker.tick()).collect();
        assert_eq!(
            pattern,
            [true, true, true, false, false, false, true, true, true, false, false, false]
        );
    }

    #[test]
    fn test_power_blinks_every_tick_while_disconnected() {
        let mut indicators = Indicators::new(&TimingConfig::default());
        let mut outputs = MockOutputs::new();
        let mut levels = std::vec::Vec::new();
        for _ in 0..4 {
            indicators.update(false, false, &mut outputs);
            levels.push(outputs.level(OutputId::PowerLed));
        }
        assert_eq!(levels, [Level::High, Level::Low, Level::High, Level::Low]);
        assert_eq!(outputs.level(OutputId::ErrorLed), Level::Low);
    }

    #[test]
    fn test_power_solid_while_connected() {
        let mut indicators = Indicators::new(&TimingConfig::default());
        let mut outputs = MockOutputs::new();
        for _ in 0..10 {
            indicators.update(true, false, &mut outputs);
            assert_eq!(outputs.level(OutputId::PowerLed), Level::High);
        }
        // Written once, not every tick
        assert_eq!(outputs.writes_to(OutputId::PowerLed), 1);
    }

    #[test]
    fn test_error_blinks_only_when_connected() {
        let mut indicators = Indicators::new(&TimingConfig::default());
        let mut outputs = MockOutputs::new();

        for _ in 0..20 {
            indicators.update(false, true, &mut outputs);
            assert_eq!(outputs.level(OutputId::ErrorLed), Level::Low);
        }

        let mut lit = 0;
        for _ in 0..20 {
            indicators.update(true, true, &mut outputs);
            if outputs.level(OutputId::ErrorLed) == Level::High {
                lit += 1;
            }
        }
        assert_eq!(lit, 10);
    }

    #[test]
    fn test_error_forced_low_when_cleared() {
        let mut indicators = Indicators::new(&TimingConfig::default());
        let mut outputs = MockOutputs::new();
        indicators.update(true, true, &mut outputs);
        assert_eq!(outputs.level(OutputId::ErrorLed), Level::High);

        indicators.update(true, false, &mut outputs);
        assert_eq!(outputs.level(OutputId::ErrorLed), Level::Low);
        let writes = outputs.writes_to(OutputId::ErrorLed);
        indicators.update(true, false, &mut outputs);
        assert_eq!(outputs.writes_to(OutputId::ErrorLed), writes);
    }
}
