// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin table and chip conventions for one driver board.
//!
//! A [`DriverConfig`] is plain `const` data. Everything that differs between the supported boards
//! (pin numbers, which direction-line combination means forward, the current-sense scale, fault
//! polarity) lives here so that the controller logic is written once.

use thiserror::Error;

use super::mode::{Channel, Direction, Group, Mode, MAX_DUTY};
use crate::hw::{AnalogPin, Level, Pin};

/// Direction-line levels that float both bridge outputs when PWM is held at full duty.
///
/// This is MC33926/VNH5019 family wiring. Other chips need their own combination.
pub const COAST_LINES: (Level, Level) = (Level::Low, Level::Low);

/// Strongest proportional brake. Full duty on the coast lines is coast, so braking stops one
/// step short of it.
pub const MAX_BRAKE_DUTY: u8 = MAX_DUTY - 1;

/// Which direction line is driven high for forward travel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Forward = IN1 high, IN2 low.
    In1High,
    /// Forward = IN1 low, IN2 high.
    In2High,
}

impl Polarity {
    /// `(IN1, IN2)` levels for a direction of travel.
    #[inline]
    pub const fn lines(self, direction: Direction) -> (Level, Level) {
        match (self, direction) {
            (Polarity::In1High, Direction::Forward) | (Polarity::In2High, Direction::Reverse) => {
                (Level::High, Level::Low)
            }
            (Polarity::In1High, Direction::Reverse) | (Polarity::In2High, Direction::Forward) => {
                (Level::Low, Level::High)
            }
        }
    }

    /// Direction selected by a latched `(IN1, IN2)` pair, `None` for the coast/brake pair.
    pub fn direction(self, lines: (Level, Level)) -> Option<Direction> {
        [Direction::Forward, Direction::Reverse]
            .into_iter()
            .find(|&d| self.lines(d) == lines)
    }

    /// Mode of an enabled channel with the given direction lines and duty.
    pub fn mode(self, lines: (Level, Level), duty: u8) -> Mode {
        match self.direction(lines) {
            Some(direction) => Mode::driving(direction, duty),
            None if duty == MAX_DUTY => Mode::Coast,
            None => Mode::Brake,
        }
    }
}

/// Level of the status line that signals a driver fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultPolarity {
    ActiveLow,
    ActiveHigh,
}

impl FaultPolarity {
    #[inline]
    pub fn is_fault(self, level: Level) -> bool {
        match self {
            FaultPolarity::ActiveLow => level.is_low(),
            FaultPolarity::ActiveHigh => level.is_high(),
        }
    }
}

/// Lines belonging to one motor channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelPins {
    pub in1: Pin,
    pub in2: Pin,
    /// 8-bit PWM output.
    pub pwm: Pin,
    /// Enable line. Channels of the same [`Group`] list the same pin.
    pub enable: Pin,
    /// Status/fault flag from the driver chip.
    pub status: Pin,
    /// Current feedback (FB / CS) output of the driver chip.
    pub current_sense: AnalogPin,
    /// Encoder input counted elsewhere. Only its line mode is set up here.
    pub encoder: Option<Pin>,
}

/// Complete description of a driver board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    pub name: &'static str,
    /// Channels A, B and C, in that order.
    pub channels: [ChannelPins; 3],
    pub polarity: Polarity,
    pub fault_polarity: FaultPolarity,
    /// Milliamps per ADC count on the current-sense inputs.
    pub current_scale_ma: u32,
    /// Turn on internal pull-ups on the encoder inputs.
    pub encoder_pull_up: bool,
    /// Low-side braking with PWM on both direction lines low (VNH5019 family).
    pub proportional_brake: bool,
    /// Battery voltage divider tap, if the board has one.
    pub battery_monitor: Option<AnalogPin>,
}

/// Defects in a pin table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("pin {0} is assigned to more than one line")]
    PinConflict(Pin),
    #[error("analog input {0} is assigned to more than one line")]
    AnalogConflict(AnalogPin),
    #[error("channels of group {0:?} do not share one enable line")]
    SplitEnable(Group),
}

// Per channel: in1, in2, pwm, status, encoder. Plus one enable per group.
const MAX_DIGITAL: usize = 3 * 5 + 2;
// Three current-sense inputs plus the battery monitor.
const MAX_ANALOG: usize = 3 + 1;

impl DriverConfig {
    #[inline]
    pub const fn channel(&self, channel: Channel) -> &ChannelPins {
        &self.channels[channel.index()]
    }

    /// Enable line of a group (the enable pin of its first member).
    #[inline]
    pub const fn group_enable(&self, group: Group) -> Pin {
        self.channel(group.members()[0]).enable
    }

    /// Convert a raw current-sense sample to milliamps.
    #[inline]
    pub const fn milliamps(&self, raw: u16) -> u32 {
        raw as u32 * self.current_scale_ma
    }

    /// Check that every line has exactly one role.
    ///
    /// The only pin allowed to appear twice is the enable line shared inside a group, and every
    /// member of a group must name the same enable pin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for group in Group::ALL {
            let enable = self.group_enable(group);
            if group
                .members()
                .iter()
                .any(|&ch| self.channel(ch).enable != enable)
            {
                return Err(ConfigError::SplitEnable(group));
            }
        }

        let mut digital = [Pin(0); MAX_DIGITAL];
        let mut n = 0;
        let mut push = |pin: Pin| -> Result<(), ConfigError> {
            if digital[..n].contains(&pin) {
                return Err(ConfigError::PinConflict(pin));
            }
            digital[n] = pin;
            n += 1;
            Ok(())
        };
        for pins in &self.channels {
            push(pins.in1)?;
            push(pins.in2)?;
            push(pins.pwm)?;
            push(pins.status)?;
            if let Some(enc) = pins.encoder {
                push(enc)?;
            }
        }
        for group in Group::ALL {
            push(self.group_enable(group))?;
        }

        let mut analog = [AnalogPin(0); MAX_ANALOG];
        let mut m = 0;
        let inputs = self
            .channels
            .iter()
            .map(|pins| pins.current_sense)
            .chain(self.battery_monitor);
        for pin in inputs {
            if analog[..m].contains(&pin) {
                return Err(ConfigError::AnalogConflict(pin));
            }
            analog[m] = pin;
            m += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::{pololu_big, three_motor};

    #[test]
    fn polarity_lines_are_mirror_images() {
        assert_eq!(
            Polarity::In1High.lines(Direction::Forward),
            (Level::High, Level::Low)
        );
        assert_eq!(
            Polarity::In1High.lines(Direction::Reverse),
            (Level::Low, Level::High)
        );
        assert_eq!(
            Polarity::In2High.lines(Direction::Forward),
            Polarity::In1High.lines(Direction::Reverse)
        );
        assert_eq!(
            Polarity::In2High.lines(Direction::Reverse),
            Polarity::In1High.lines(Direction::Forward)
        );
    }

    #[test]
    fn coast_lines_differ_from_both_directions() {
        for polarity in [Polarity::In1High, Polarity::In2High] {
            assert_ne!(polarity.lines(Direction::Forward), COAST_LINES);
            assert_ne!(polarity.lines(Direction::Reverse), COAST_LINES);
        }
    }

    #[test]
    fn latched_lines_decode_to_one_mode() {
        for polarity in [Polarity::In1High, Polarity::In2High] {
            for direction in [Direction::Forward, Direction::Reverse] {
                assert_eq!(polarity.direction(polarity.lines(direction)), Some(direction));
            }
            assert_eq!(polarity.direction(COAST_LINES), None);
            assert_eq!(
                polarity.mode(polarity.lines(Direction::Reverse), 0),
                Mode::Reverse(0)
            );
            assert_eq!(polarity.mode(COAST_LINES, MAX_DUTY), Mode::Coast);
            assert_eq!(polarity.mode(COAST_LINES, MAX_BRAKE_DUTY), Mode::Brake);
        }
    }

    #[test]
    fn fault_polarity() {
        assert!(FaultPolarity::ActiveLow.is_fault(Level::Low));
        assert!(!FaultPolarity::ActiveLow.is_fault(Level::High));
        assert!(FaultPolarity::ActiveHigh.is_fault(Level::High));
    }

    #[test]
    fn shipped_boards_validate() {
        assert_eq!(three_motor::CONFIG.validate(), Ok(()));
        assert_eq!(pololu_big::CONFIG.validate(), Ok(()));
    }

    #[test]
    fn milliamps_is_linear_over_adc_range() {
        for raw in 0..=1023u16 {
            assert_eq!(three_motor::CONFIG.milliamps(raw), raw as u32 * 10);
            assert_eq!(pololu_big::CONFIG.milliamps(raw), raw as u32 * 34);
        }
    }

    #[test]
    fn duplicate_pin_is_rejected() {
        let mut cfg = three_motor::CONFIG;
        cfg.channels[2].pwm = cfg.channels[0].pwm;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::PinConflict(cfg.channels[0].pwm))
        );
    }

    #[test]
    fn enable_shared_across_groups_is_rejected() {
        let mut cfg = three_motor::CONFIG;
        cfg.channels[2].enable = cfg.channels[0].enable;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::PinConflict(cfg.channels[0].enable))
        );
    }

    #[test]
    fn split_enable_is_rejected() {
        let mut cfg = pololu_big::CONFIG;
        cfg.channels[1].enable = Pin(49);
        assert_eq!(cfg.validate(), Err(ConfigError::SplitEnable(Group::AB)));
    }

    #[test]
    fn analog_conflict_is_rejected() {
        let mut cfg = pololu_big::CONFIG;
        cfg.battery_monitor = Some(cfg.channels[1].current_sense);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::AnalogConflict(cfg.channels[1].current_sense))
        );
    }
}
