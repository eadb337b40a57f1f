// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! [`MotorHal`] over STM32F777 pins, addressed by board header number.
//!
//! The header is built once at startup from tables that pair each header number with the erased
//! MCU pin, PWM channel or ADC channel wired to it. Pin direction and pull configuration are fixed
//! when those pins are created, so [`MotorHal::configure`] checks that a line exists in exactly the
//! requested role, pull-up included.

use stm32f7xx_hal::{
    gpio::{ErasedPin, Floating, Input, Output, PullUp, PushPull},
    prelude::*,
};

use super::adc::AdcRead;
use super::lines::{AnalogPin, Level, MotorHal, Pin, PinMode};
use crate::drivers::MAX_DUTY;

pub type OutputLine = ErasedPin<Output<PushPull>>;
pub type PwmLine<'a> = &'a mut dyn _embedded_hal_PwmPin<Duty = u16>;

/// Digital input, floating or with the internal pull-up on.
pub enum InputLine {
    Floating(ErasedPin<Input<Floating>>),
    PullUp(ErasedPin<Input<PullUp>>),
}

impl InputLine {
    fn mode(&self) -> PinMode {
        match self {
            InputLine::Floating(_) => PinMode::Input,
            InputLine::PullUp(_) => PinMode::InputPullUp,
        }
    }

    fn is_high(&self) -> bool {
        match self {
            InputLine::Floating(pin) => pin.is_high(),
            InputLine::PullUp(pin) => pin.is_high(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderError {
    /// No MCU pin is wired to this header number.
    Unmapped(Pin),
    /// No ADC channel is wired to this analog input.
    UnmappedAnalog(AnalogPin),
    /// The line exists but in another role, e.g. a floating input asked for a pull-up.
    WrongMode(Pin),
}

/// Board header: digital outputs, digital inputs, PWM outputs and analog inputs.
pub struct Header<'a, A, const O: usize, const I: usize, const P: usize, const N: usize> {
    outputs: [(Pin, OutputLine); O],
    inputs: [(Pin, InputLine); I],
    pwm: [(Pin, PwmLine<'a>); P],
    analog: [(AnalogPin, u8); N],
    adc: A,
}

impl<'a, A, const O: usize, const I: usize, const P: usize, const N: usize>
    Header<'a, A, O, I, P, N>
where
    A: AdcRead,
{
    /// `analog` pairs each analog header input with its ADC channel number.
    pub fn new(
        outputs: [(Pin, OutputLine); O],
        inputs: [(Pin, InputLine); I],
        pwm: [(Pin, PwmLine<'a>); P],
        analog: [(AnalogPin, u8); N],
        adc: A,
    ) -> Self {
        Self {
            outputs,
            inputs,
            pwm,
            analog,
            adc,
        }
    }

    fn output(&mut self, pin: Pin) -> Option<&mut OutputLine> {
        self.outputs
            .iter_mut()
            .find(|(p, _)| *p == pin)
            .map(|(_, line)| line)
    }

    fn input(&self, pin: Pin) -> Option<&InputLine> {
        self.inputs
            .iter()
            .find(|(p, _)| *p == pin)
            .map(|(_, line)| line)
    }

    fn pwm_line(&mut self, pin: Pin) -> Option<&mut PwmLine<'a>> {
        self.pwm
            .iter_mut()
            .find(|(p, _)| *p == pin)
            .map(|(_, line)| line)
    }

    fn is_mapped(&self, pin: Pin) -> bool {
        self.outputs.iter().any(|(p, _)| *p == pin)
            || self.inputs.iter().any(|(p, _)| *p == pin)
            || self.pwm.iter().any(|(p, _)| *p == pin)
    }

    fn missing(&self, pin: Pin) -> HeaderError {
        if self.is_mapped(pin) {
            HeaderError::WrongMode(pin)
        } else {
            HeaderError::Unmapped(pin)
        }
    }
}

impl<'a, A, const O: usize, const I: usize, const P: usize, const N: usize> MotorHal
    for Header<'a, A, O, I, P, N>
where
    A: AdcRead,
{
    type Error = HeaderError;

    fn configure(&mut self, pin: Pin, mode: PinMode) -> Result<(), HeaderError> {
        if mode.is_input() {
            return match self.input(pin) {
                Some(line) if line.mode() == mode => Ok(()),
                Some(_) => Err(HeaderError::WrongMode(pin)),
                None => Err(self.missing(pin)),
            };
        }

        if let Some(line) = self.pwm_line(pin) {
            line.set_duty(0);
            line.enable();
            return Ok(());
        }
        match self.output(pin) {
            Some(_) => Ok(()),
            None => Err(self.missing(pin)),
        }
    }

    fn write(&mut self, pin: Pin, level: Level) -> Result<(), HeaderError> {
        match self.output(pin) {
            Some(line) => {
                match level {
                    Level::High => line.set_high(),
                    Level::Low => line.set_low(),
                }
                Ok(())
            }
            None => Err(self.missing(pin)),
        }
    }

    fn read(&mut self, pin: Pin) -> Result<Level, HeaderError> {
        match self.input(pin) {
            Some(line) => Ok(Level::from(line.is_high())),
            None => Err(self.missing(pin)),
        }
    }

    fn set_duty(&mut self, pin: Pin, duty: u8) -> Result<(), HeaderError> {
        match self.pwm_line(pin) {
            Some(line) => {
                let max = line.get_max_duty() as u32;
                line.set_duty((duty as u32 * max / MAX_DUTY as u32) as u16);
                Ok(())
            }
            None => Err(self.missing(pin)),
        }
    }

    fn read_analog(&mut self, pin: AnalogPin) -> Result<u16, HeaderError> {
        let ch = self
            .analog
            .iter()
            .find(|(p, _)| *p == pin)
            .map(|&(_, ch)| ch)
            .ok_or(HeaderError::UnmappedAnalog(pin))?;
        Ok(self.adc.read_channel(ch))
    }
}
