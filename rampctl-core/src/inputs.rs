//! Boot-time sampling of the configuration switches and potentiometers
//!
//! DIP switches pull their pin to ground when ON (pull-ups enabled), so a
//! low pin reads as a set bit.

use heapless::Vec;
use rampctl_hal::{AnalogInput, InputPin};

/// Errors while sampling configuration inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Relay timer potentiometer conversion failed
    RelayTimerAdc,
    /// Sensitivity potentiometer conversion failed
    SensitivityAdc,
}

/// Raw values read from the configuration inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationInputs {
    pub operation_mode_bits: u8,
    pub direction_bit: bool,
    pub relay_timing_bit: bool,
    pub direction_category_bits: u8,
    pub sensitivity_bits: u8,
    pub raw_relay_timer_adc: u16,
    /// Sampled for diagnostics only
    pub raw_sensitivity_adc: u16,
}

/// Configuration inputs and the potentiometers that failed to read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSample {
    pub inputs: ConfigurationInputs,
    /// A failed potentiometer reads as zero; the others keep their value
    pub errors: Vec<InputError, 2>,
}

/// The controller's DIP switch bank
///
/// Two-bit fields hold the low bit at index 0.
pub struct DipSwitches<P> {
    pub operation_mode: [P; 2],
    pub direction: P,
    pub relay_timing: P,
    pub direction_category: [P; 2],
    pub sensitivity: [P; 2],
}

impl<P: InputPin> DipSwitches<P> {
    fn bits(pins: &[P; 2]) -> u8 {
        pins.iter()
            .enumerate()
            .filter(|(_, pin)| switch_on(*pin))
            .fold(0, |acc, (bit, _)| acc | (1 << bit))
    }
}

fn switch_on<P: InputPin>(pin: &P) -> bool {
    pin.is_low()
}

/// Read only the switches, leaving both ADC readings at zero
pub fn read_switch_inputs<P: InputPin>(switches: &DipSwitches<P>) -> ConfigurationInputs {
    ConfigurationInputs {
        operation_mode_bits: DipSwitches::bits(&switches.operation_mode),
        direction_bit: switch_on(&switches.direction),
        relay_timing_bit: switch_on(&switches.relay_timing),
        direction_category_bits: DipSwitches::bits(&switches.direction_category),
        sensitivity_bits: DipSwitches::bits(&switches.sensitivity),
        raw_relay_timer_adc: 0,
        raw_sensitivity_adc: 0,
    }
}

/// Sample every configuration input once
pub fn read_configuration_inputs<P, R, S>(
    switches: &DipSwitches<P>,
    relay_pot: &mut R,
    sensitivity_pot: &mut S,
) -> InputSample
where
    P: InputPin,
    R: AnalogInput,
    S: AnalogInput,
{
    let mut sample = InputSample {
        inputs: read_switch_inputs(switches),
        errors: Vec::new(),
    };
    sample.inputs.raw_relay_timer_adc =
        read_potentiometer(relay_pot, InputError::RelayTimerAdc, &mut sample.errors);
    sample.inputs.raw_sensitivity_adc =
        read_potentiometer(sensitivity_pot, InputError::SensitivityAdc, &mut sample.errors);
    sample
}

fn read_potentiometer<A: AnalogInput>(
    pot: &mut A,
    error: InputError,
    errors: &mut Vec<InputError, 2>,
) -> u16 {
    pot.read_raw().unwrap_or_else(|_| {
        // Capacity covers both potentiometers
        let _ = errors.push(error);
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigurationSnapshot;
    use crate::testing::{MockAdc, MockPin};

    fn all_off() -> DipSwitches<MockPin> {
        DipSwitches {
            operation_mode: [MockPin::high(), MockPin::high()],
            direction: MockPin::high(),
            relay_timing: MockPin::high(),
            direction_category: [MockPin::high(), MockPin::high()],
            sensitivity: [MockPin::high(), MockPin::high()],
        }
    }

    #[test]
    fn test_all_switches_off() {
        let inputs = read_switch_inputs(&all_off());
        assert_eq!(inputs, ConfigurationInputs::default());
    }

    #[test]
    fn test_switches_are_active_low() {
        let mut switches = all_off();
        switches.operation_mode = [MockPin::low(), MockPin::high()];
        switches.direction = MockPin::low();
        switches.direction_category = [MockPin::high(), MockPin::low()];
        switches.sensitivity = [MockPin::low(), MockPin::low()];

        let inputs = read_switch_inputs(&switches);
        assert_eq!(inputs.operation_mode_bits, 0b01);
        assert!(inputs.direction_bit);
        assert!(!inputs.relay_timing_bit);
        assert_eq!(inputs.direction_category_bits, 0b10);
        assert_eq!(inputs.sensitivity_bits, 0b11);
    }

    #[test]
    fn test_reads_both_potentiometers() {
        let mut relay_pot = MockAdc::new(Ok(2600));
        let mut sensitivity_pot = MockAdc::new(Ok(1234));
        let sample = read_configuration_inputs(&all_off(), &mut relay_pot, &mut sensitivity_pot);
        assert!(sample.errors.is_empty());
        assert_eq!(sample.inputs.raw_relay_timer_adc, 2600);
        assert_eq!(sample.inputs.raw_sensitivity_adc, 1234);
    }

    #[test]
    fn test_relay_pot_failure_reads_zero() {
        let mut switches = all_off();
        switches.operation_mode = [MockPin::low(), MockPin::high()];
        let mut relay_pot = MockAdc::new(Err(()));
        let mut sensitivity_pot = MockAdc::new(Ok(1234));

        let sample = read_configuration_inputs(&switches, &mut relay_pot, &mut sensitivity_pot);
        assert_eq!(sample.errors.as_slice(), [InputError::RelayTimerAdc]);
        assert_eq!(sample.inputs.raw_relay_timer_adc, 0);
        assert_eq!(sample.inputs.raw_sensitivity_adc, 1234);
        // Switches are still honored
        assert_eq!(sample.inputs.operation_mode_bits, 0b01);
    }

    #[test]
    fn test_sensitivity_pot_failure_keeps_relay_timer() {
        let mut relay_pot = MockAdc::new(Ok(3000));
        let mut sensitivity_pot = MockAdc::new(Err(()));

        let sample = read_configuration_inputs(&all_off(), &mut relay_pot, &mut sensitivity_pot);
        assert_eq!(sample.errors.as_slice(), [InputError::SensitivityAdc]);
        assert_eq!(sample.inputs.raw_relay_timer_adc, 3000);
        assert_eq!(sample.inputs.raw_sensitivity_adc, 0);

        let config = ConfigurationSnapshot::from_inputs(&sample.inputs);
        assert_eq!(config.relay_timer_seconds, 15);
    }

    #[test]
    fn test_both_pots_failing() {
        let mut relay_pot = MockAdc::new(Err(()));
        let mut sensitivity_pot = MockAdc::new(Err(()));
        let sample = read_configuration_inputs(&all_off(), &mut relay_pot, &mut sensitivity_pot);
        assert_eq!(
            sample.errors.as_slice(),
            [InputError::RelayTimerAdc, InputError::SensitivityAdc]
        );
        assert_eq!(sample.inputs, ConfigurationInputs::default());
    }
}
