// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # H-Bridge Drivers
//!
//! Board-independent motor control that sits above the line-level `hw` layer.
//!
//! - [`config`] – pin tables and chip conventions
//! - [`controller`] – the channel controller shared by every board
//! - [`mode`] – channel addressing and drive modes

pub mod config;
pub mod controller;
pub mod mode;

pub use config::{
    ChannelPins, ConfigError, DriverConfig, FaultPolarity, Polarity, COAST_LINES, MAX_BRAKE_DUTY,
};
pub use controller::{Error, MotorController};
pub use mode::{Channel, Direction, Group, Mode, MAX_DUTY};
