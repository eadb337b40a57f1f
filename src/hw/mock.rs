// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Mock HAL for testing.
//!
//! Latches every digital level and PWM duty written to it, so tests can assert on the exact line
//! combination a command produced. Inputs and ADC samples are injected by the test.

use super::lines::{AnalogPin, Level, MotorHal, Pin, PinMode};

/// Digital lines on the Arduino Mega header (D0..=D69).
pub const PIN_COUNT: usize = 70;
/// Analog inputs on the Arduino Mega header (A0..=A15).
pub const ANALOG_COUNT: usize = 16;

const ADC_MAX: u16 = 1023;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MockError {
    /// Pin number past the end of the header.
    UnknownPin(Pin),
    /// Analog input past the end of the header.
    UnknownAnalog(AnalogPin),
    /// Line used before `configure`.
    Unconfigured(Pin),
    /// Level or duty written to an input line.
    NotOutput(Pin),
}

/// In-memory board with latched outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockHal {
    modes: [Option<PinMode>; PIN_COUNT],
    levels: [Level; PIN_COUNT],
    duty: [Option<u8>; PIN_COUNT],
    analog: [u16; ANALOG_COUNT],
    writes: usize,
}

impl Default for MockHal {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHal {
    pub fn new() -> Self {
        Self {
            modes: [None; PIN_COUNT],
            levels: [Level::Low; PIN_COUNT],
            duty: [None; PIN_COUNT],
            analog: [0; ANALOG_COUNT],
            writes: 0,
        }
    }

    fn slot(pin: Pin) -> Result<usize, MockError> {
        let idx = pin.0 as usize;
        if idx < PIN_COUNT {
            Ok(idx)
        } else {
            Err(MockError::UnknownPin(pin))
        }
    }

    fn output_slot(&self, pin: Pin) -> Result<usize, MockError> {
        let idx = Self::slot(pin)?;
        match self.modes[idx] {
            Some(PinMode::Output) => Ok(idx),
            Some(_) => Err(MockError::NotOutput(pin)),
            None => Err(MockError::Unconfigured(pin)),
        }
    }

    /// Mode the line was configured with, if any.
    pub fn mode(&self, pin: Pin) -> Option<PinMode> {
        self.modes.get(pin.0 as usize).copied().flatten()
    }

    /// Latched level of a line.
    pub fn level(&self, pin: Pin) -> Level {
        self.levels
            .get(pin.0 as usize)
            .copied()
            .unwrap_or(Level::Low)
    }

    /// Last PWM duty written to a line, `None` if it never carried PWM.
    pub fn duty(&self, pin: Pin) -> Option<u8> {
        self.duty.get(pin.0 as usize).copied().flatten()
    }

    /// Drive an input line from outside the board.
    pub fn set_input(&mut self, pin: Pin, level: Level) {
        if let Some(slot) = self.levels.get_mut(pin.0 as usize) {
            *slot = level;
        }
    }

    /// Set the next ADC sample of an analog input. Clamped to the 10-bit range.
    pub fn set_analog(&mut self, pin: AnalogPin, raw: u16) {
        if let Some(slot) = self.analog.get_mut(pin.0 as usize) {
            *slot = raw.min(ADC_MAX);
        }
    }

    /// Number of level and duty writes accepted so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl MotorHal for MockHal {
    type Error = MockError;

    fn configure(&mut self, pin: Pin, mode: PinMode) -> Result<(), MockError> {
        let idx = Self::slot(pin)?;
        self.modes[idx] = Some(mode);
        if mode == PinMode::InputPullUp {
            self.levels[idx] = Level::High;
        }
        Ok(())
    }

    fn write(&mut self, pin: Pin, level: Level) -> Result<(), MockError> {
        let idx = self.output_slot(pin)?;
        self.levels[idx] = level;
        self.writes += 1;
        Ok(())
    }

    fn read(&mut self, pin: Pin) -> Result<Level, MockError> {
        let idx = Self::slot(pin)?;
        if self.modes[idx].is_none() {
            return Err(MockError::Unconfigured(pin));
        }
        Ok(self.levels[idx])
    }

    fn set_duty(&mut self, pin: Pin, duty: u8) -> Result<(), MockError> {
        let idx = self.output_slot(pin)?;
        self.duty[idx] = Some(duty);
        self.writes += 1;
        Ok(())
    }

    fn read_analog(&mut self, pin: AnalogPin) -> Result<u16, MockError> {
        self.analog
            .get(pin.0 as usize)
            .copied()
            .ok_or(MockError::UnknownAnalog(pin))
    }
}
