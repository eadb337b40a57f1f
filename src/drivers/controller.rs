// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Generic H-bridge channel controller.
//!
//! Maps signed speed commands and brake/coast requests onto the enable, direction and PWM lines
//! described by a [`DriverConfig`], and converts the current-sense and status inputs back into
//! something a caller can act on.
//!
//! Every command rewrites the full line combination of the channels it touches, so no call can
//! leave a channel half way between two modes.

use thiserror::Error;

use super::config::{ConfigError, DriverConfig, COAST_LINES, MAX_BRAKE_DUTY};
use super::mode::{saturate, split_speed, Channel, Group, Mode, MAX_DUTY};
use crate::hw::{Level, MotorHal, PinMode};
use crate::log::{log_debug, log_info, log_warn};

/// Construction failures.
#[derive(Debug, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    #[error("invalid pin table: {0}")]
    Config(#[from] ConfigError),
    #[error("hardware access failed: {0:?}")]
    Hal(E),
}

/// Controller for one driver board.
pub struct MotorController<H: MotorHal> {
    hal: H,
    config: DriverConfig,
    modes: [Mode; 3],
    // Last levels written to each channel's direction lines and PWM, and to each group enable.
    lines: [(Level, Level); 3],
    duty: [u8; 3],
    enables: [Level; 2],
}

impl<H: MotorHal> MotorController<H> {
    /// Validate the pin table, configure every line and bring all channels to the safe startup
    /// state: enable low, forward polarity, zero duty.
    pub fn new(hal: H, config: DriverConfig) -> Result<Self, Error<H::Error>> {
        config.validate()?;

        let mut this = Self {
            hal,
            config,
            modes: [Mode::Forward(0); 3],
            lines: [COAST_LINES; 3],
            duty: [0; 3],
            enables: [Level::Low; 2],
        };
        this.configure_lines().map_err(Error::Hal)?;
        this.reset().map_err(Error::Hal)?;

        log_info!("motor driver ready: {}", config.name);
        Ok(this)
    }

    fn configure_lines(&mut self) -> Result<(), H::Error> {
        let encoder_mode = if self.config.encoder_pull_up {
            PinMode::InputPullUp
        } else {
            PinMode::Input
        };

        for pins in self.config.channels {
            self.hal.configure(pins.in1, PinMode::Output)?;
            self.hal.configure(pins.in2, PinMode::Output)?;
            self.hal.configure(pins.pwm, PinMode::Output)?;
            self.hal.configure(pins.status, PinMode::Input)?;
            if let Some(enc) = pins.encoder {
                self.hal.configure(enc, encoder_mode)?;
            }
        }
        for group in Group::ALL {
            self.hal
                .configure(self.config.group_enable(group), PinMode::Output)?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<(), H::Error> {
        for group in Group::ALL {
            self.write_enable(group, Level::Low)?;
            for &ch in group.members() {
                self.drive(ch, 0)?;
            }
        }
        Ok(())
    }

    /// Write a group enable line.
    ///
    /// Raising a disabled group puts every member back under its latched direction lines and
    /// duty, so their modes are decoded again from those lines.
    fn write_enable(&mut self, group: Group, level: Level) -> Result<(), H::Error> {
        self.hal.write(self.config.group_enable(group), level)?;
        if level.is_high() && self.enables[group.index()].is_low() {
            for &ch in group.members() {
                let i = ch.index();
                self.modes[i] = self.config.polarity.mode(self.lines[i], self.duty[i]);
            }
        }
        self.enables[group.index()] = level;
        Ok(())
    }

    fn write_lines(&mut self, channel: Channel, lines: (Level, Level)) -> Result<(), H::Error> {
        let pins = *self.config.channel(channel);
        self.hal.write(pins.in1, lines.0)?;
        self.hal.write(pins.in2, lines.1)?;
        self.lines[channel.index()] = lines;
        Ok(())
    }

    #[inline]
    fn write_duty(&mut self, channel: Channel, duty: u8) -> Result<(), H::Error> {
        self.hal.set_duty(self.config.channel(channel).pwm, duty)?;
        self.duty[channel.index()] = duty;
        Ok(())
    }

    /// Direction lines and duty for a speed command. Leaves the enable line alone.
    fn drive(&mut self, channel: Channel, speed: i16) -> Result<(), H::Error> {
        let (direction, duty) = split_speed(speed);
        self.write_lines(channel, self.config.polarity.lines(direction))?;
        self.write_duty(channel, duty)?;

        self.modes[channel.index()] = Mode::driving(direction, duty);
        Ok(())
    }

    /// Drive one channel.
    ///
    /// Negative speeds run in reverse. The magnitude saturates at 255. Zero still asserts enable
    /// with forward polarity, which holds the motor at zero duty rather than braking it.
    ///
    /// On boards where A and B share an enable line this also re-enables the other channel of
    /// the pair, which resumes its latched direction and duty (zero after a brake).
    pub fn set_speed(&mut self, channel: Channel, speed: i16) -> Result<(), H::Error> {
        log_debug!("set_speed {} {}", channel, speed);
        self.write_enable(channel.group(), Level::High)?;
        self.drive(channel, speed)
    }

    /// Drive both channels of a group, then assert the shared enable once.
    ///
    /// For a single-channel group `speed_b` is ignored.
    pub fn set_speeds(&mut self, group: Group, speed_a: i16, speed_b: i16) -> Result<(), H::Error> {
        log_debug!("set_speeds {} {} {}", group, speed_a, speed_b);
        for (&ch, speed) in group.members().iter().zip([speed_a, speed_b]) {
            self.drive(ch, speed)?;
        }
        self.write_enable(group, Level::High)
    }

    /// Remove drive power from a group: enable low and zero duty on every member.
    ///
    /// Whether the motors then brake or coast is decided by the chip, not by software.
    pub fn set_brakes(&mut self, group: Group) -> Result<(), H::Error> {
        log_debug!("set_brakes {}", group);
        self.write_enable(group, Level::Low)?;
        for &ch in group.members() {
            self.write_duty(ch, 0)?;
            self.modes[ch.index()] = Mode::Brake;
        }
        Ok(())
    }

    /// Let one channel spin freely: enable high, both direction lines low, full duty.
    pub fn set_coast(&mut self, channel: Channel) -> Result<(), H::Error> {
        log_debug!("set_coast {}", channel);
        self.write_enable(channel.group(), Level::High)?;
        self.coast(channel)
    }

    /// Coast every channel of a group.
    pub fn set_coast_group(&mut self, group: Group) -> Result<(), H::Error> {
        log_debug!("set_coast_group {}", group);
        self.write_enable(group, Level::High)?;
        for &ch in group.members() {
            self.coast(ch)?;
        }
        Ok(())
    }

    fn coast(&mut self, channel: Channel) -> Result<(), H::Error> {
        self.write_lines(channel, COAST_LINES)?;
        self.write_duty(channel, MAX_DUTY)?;
        self.modes[channel.index()] = Mode::Coast;
        Ok(())
    }

    /// Proportional brake: both direction lines low with `|brake|` as duty, capped at
    /// [`MAX_BRAKE_DUTY`].
    ///
    /// On VNH5019-family chips this pulls both outputs to ground for the on-time of the PWM, so
    /// the duty sets the braking strength. Boards without
    /// [`proportional_brake`](DriverConfig::proportional_brake) would coast instead, so nothing is
    /// written and `false` is returned.
    pub fn set_brake_strength(&mut self, channel: Channel, brake: i16) -> Result<bool, H::Error> {
        if !self.config.proportional_brake {
            log_warn!("{} has no proportional brake", self.config.name);
            return Ok(false);
        }
        log_debug!("set_brake_strength {} {}", channel, brake);
        self.write_enable(channel.group(), Level::High)?;
        self.write_lines(channel, COAST_LINES)?;
        self.write_duty(channel, saturate(brake).min(MAX_BRAKE_DUTY))?;
        self.modes[channel.index()] = Mode::Brake;
        Ok(true)
    }

    /// Motor current in milliamps. A plain linear scale of the raw sample, no filtering.
    pub fn current_ma(&mut self, channel: Channel) -> Result<u32, H::Error> {
        let raw = self
            .hal
            .read_analog(self.config.channel(channel).current_sense)?;
        Ok(self.config.milliamps(raw))
    }

    /// Motor currents of channels A, B and C.
    pub fn currents(&mut self) -> Result<[u32; 3], H::Error> {
        Ok([
            self.current_ma(Channel::A)?,
            self.current_ma(Channel::B)?,
            self.current_ma(Channel::C)?,
        ])
    }

    /// Raw level of the status line, without interpretation.
    pub fn status(&mut self, channel: Channel) -> Result<Level, H::Error> {
        self.hal.read(self.config.channel(channel).status)
    }

    /// Status line interpreted with the board's fault polarity.
    ///
    /// Reporting only: the controller does not stop the channel on a fault.
    pub fn is_faulted(&mut self, channel: Channel) -> Result<bool, H::Error> {
        let level = self.status(channel)?;
        let faulted = self.config.fault_polarity.is_fault(level);
        if faulted {
            log_warn!("driver fault on channel {}", channel);
        }
        Ok(faulted)
    }

    /// Raw battery divider sample, `None` on boards without a battery tap.
    pub fn battery_monitor(&mut self) -> Result<Option<u16>, H::Error> {
        match self.config.battery_monitor {
            Some(pin) => self.hal.read_analog(pin).map(Some),
            None => Ok(None),
        }
    }

    /// Last commanded mode of a channel.
    #[inline]
    pub fn mode(&self, channel: Channel) -> Mode {
        self.modes[channel.index()]
    }

    #[inline]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    #[inline]
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Mutable access to the HAL, e.g. for lines the controller does not own.
    #[inline]
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Tear down the controller and return the HAL.
    pub fn free(self) -> H {
        self.hal
    }
}
