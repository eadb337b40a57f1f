// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line-level capabilities consumed by the motor controller.
//!
//! Pins are named by their number on the board header (the Arduino Mega numbering the driver
//! boards were laid out against), not by MCU port. Mapping a header number onto a physical pin is
//! the job of the [`MotorHal`] implementation.

use core::fmt;

/// Digital line on the board header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(pub u8);

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

/// Analog input on the board header (`AnalogPin(6)` is `A6`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogPin(pub u8);

impl fmt::Display for AnalogPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

/// Logic level of a digital line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    #[inline]
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    #[inline]
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Electrical role of a digital line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Output,
    Input,
    /// Input with the internal pull-up resistor enabled.
    InputPullUp,
}

impl PinMode {
    #[inline]
    pub fn is_input(self) -> bool {
        matches!(self, PinMode::Input | PinMode::InputPullUp)
    }
}

/// Hardware capabilities the controller needs from a board.
///
/// Every call takes effect before it returns. Implementations must not buffer writes.
pub trait MotorHal {
    type Error;

    /// Set the electrical role of a digital line.
    ///
    /// Fails if the line cannot take that role, pull-up included.
    fn configure(&mut self, pin: Pin, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive an output line.
    fn write(&mut self, pin: Pin, level: Level) -> Result<(), Self::Error>;

    /// Sample a digital line.
    fn read(&mut self, pin: Pin) -> Result<Level, Self::Error>;

    /// Set the PWM duty on an output line, `0` (off) to `255` (fully on).
    fn set_duty(&mut self, pin: Pin, duty: u8) -> Result<(), Self::Error>;

    /// Take one raw ADC sample, 10-bit (`0..=1023`).
    fn read_analog(&mut self, pin: AnalogPin) -> Result<u16, Self::Error>;
}

impl<H: MotorHal + ?Sized> MotorHal for &mut H {
    type Error = H::Error;

    #[inline]
    fn configure(&mut self, pin: Pin, mode: PinMode) -> Result<(), Self::Error> {
        (**self).configure(pin, mode)
    }

    #[inline]
    fn write(&mut self, pin: Pin, level: Level) -> Result<(), Self::Error> {
        (**self).write(pin, level)
    }

    #[inline]
    fn read(&mut self, pin: Pin) -> Result<Level, Self::Error> {
        (**self).read(pin)
    }

    #[inline]
    fn set_duty(&mut self, pin: Pin, duty: u8) -> Result<(), Self::Error> {
        (**self).set_duty(pin, duty)
    }

    #[inline]
    fn read_analog(&mut self, pin: AnalogPin) -> Result<u16, Self::Error> {
        (**self).read_analog(pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(Level::default().is_low());
    }

    #[test]
    fn pins_display_with_header_prefix() {
        assert_eq!(format!("{}", Pin(28)), "D28");
        assert_eq!(format!("{}", AnalogPin(6)), "A6");
    }

    #[test]
    fn pull_up_counts_as_input() {
        assert!(PinMode::InputPullUp.is_input());
        assert!(PinMode::Input.is_input());
        assert!(!PinMode::Output.is_input());
    }
}
