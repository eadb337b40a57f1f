// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Custom three-motor board built on MC33926 H-bridges.
//!
//! Jumpers: D1 and INV are tied to GND so both IN1 and IN2 are driven and coasting is possible.
//! PWM goes to the inverted D2 input, so a LOW PWM line puts the outputs in high impedance. PWM
//! stays below 10 kHz, which allows the slow slew setting and leaves SLEW unconnected.
//!
//! Feedback: the FB pin sources 0.24 % of load current into a 200 Ω resistor, about 525 mV/A. At
//! 4.89 mV per count that is roughly 9.3 mA per count, rounded to 10 for integer math.
//!
//! Status is the inverted SF flag, low on fault.

use crate::drivers::config::{ChannelPins, DriverConfig, FaultPolarity, Polarity};
use crate::hw::{AnalogPin, Pin};

pub const ENABLE_AB: Pin = Pin(28);
pub const ENABLE_C: Pin = Pin(36);

pub const CONFIG: DriverConfig = DriverConfig {
    name: "three-motor MC33926",
    channels: [
        // A: left drive motor
        ChannelPins {
            in1: Pin(24),
            in2: Pin(22),
            pwm: Pin(4),
            enable: ENABLE_AB,
            status: Pin(26),
            current_sense: AnalogPin(6),
            encoder: Some(Pin(18)),
        },
        // B: right drive motor
        ChannelPins {
            in1: Pin(32),
            in2: Pin(30),
            pwm: Pin(5),
            enable: ENABLE_AB,
            status: Pin(34),
            current_sense: AnalogPin(7),
            encoder: Some(Pin(19)),
        },
        // C: camera motor
        ChannelPins {
            in1: Pin(40),
            in2: Pin(42),
            pwm: Pin(6),
            enable: ENABLE_C,
            status: Pin(38),
            current_sense: AnalogPin(8),
            encoder: Some(Pin(20)),
        },
    ],
    polarity: Polarity::In1High,
    fault_polarity: FaultPolarity::ActiveLow,
    current_scale_ma: 10,
    encoder_pull_up: true,
    proportional_brake: false,
    battery_monitor: None,
};
