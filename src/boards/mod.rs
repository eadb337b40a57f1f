// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Driver Boards
//!
//! Fixed pin tables for the supported boards. Both tables use the Arduino Mega header numbering
//! the boards were wired against.
//!
//! - [`three_motor`] – custom three-channel MC33926 board
//! - [`pololu_big`] – Pololu VNH5019 dual driver plus a third channel
//!
//! [`DEFAULT`] is the table the firmware is built for; enable the `pololu-big` feature to switch.

pub mod pololu_big;
pub mod three_motor;

use crate::drivers::DriverConfig;

#[cfg(not(feature = "pololu-big"))]
pub const DEFAULT: DriverConfig = three_motor::CONFIG;

#[cfg(feature = "pololu-big")]
pub const DEFAULT: DriverConfig = pololu_big::CONFIG;
