// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! The motor controller never touches registers directly. It drives a board through the
//! line-level [`MotorHal`] trait, which is implemented by:
//!
//! - [`mock::MockHal`] – in-memory pin latch used by the tests (`mock` feature or `cfg(test)`)
//! - [`header::Header`] – STM32F777 pins and ADC behind the board header numbering (`firmware`)

pub mod lines;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(feature = "firmware")]
pub mod adc;
#[cfg(feature = "firmware")]
pub mod header;

pub use lines::{AnalogPin, Level, MotorHal, Pin, PinMode};
