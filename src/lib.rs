// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # trimotor
//!
//! Direction, speed, brake and coast control plus current/fault sensing for up to three brushed
//! DC motors driven through H-bridge driver chips.
//!
//! Two boards are supported out of the box: the custom three-motor board (MC33926) and the Pololu
//! big dual driver (VNH5019) with a third channel. Both run the same [`MotorController`]; only the
//! [`DriverConfig`] pin table differs.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Line-level HAL trait, mock HAL, and the STM32F7 header binding (`firmware`) |
//! | [`drivers`] | Generic H-bridge channel controller and its configuration types |
//! | [`boards`] | Fixed pin tables for the supported driver boards |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

mod log;

pub mod boards;
pub mod drivers;
pub mod hw;

pub use drivers::{Channel, DriverConfig, Error, Group, Mode, MotorController};
pub use hw::{AnalogPin, Level, MotorHal, Pin, PinMode};
