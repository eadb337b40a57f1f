// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pololu VNH5019 dual driver ("big driver") with a third channel.
//!
//! The shield claims pins 2, 4, 6–10, 12, A0 and A1, so PWM A and C moved to 13 and 3 and the
//! encoders to 18–20. Forward on this wiring is IN1 low / IN2 high, the mirror image of the custom
//! board.
//!
//! Current sense: 144 mV/A into a 5 V, 10-bit ADC gives 34 mA per count.
//!
//! The battery tap on A5 is a 22 kΩ/10 kΩ divider from the motor supply. Its raw reading is
//! returned unscaled since the ratio depends on the resistors fitted to each robot.

use crate::drivers::config::{ChannelPins, DriverConfig, FaultPolarity, Polarity};
use crate::hw::{AnalogPin, Pin};

pub const ENABLE_AB: Pin = Pin(28);
pub const ENABLE_C: Pin = Pin(48);
pub const BATTERY_MONITOR: AnalogPin = AnalogPin(5);

pub const CONFIG: DriverConfig = DriverConfig {
    name: "Pololu big VNH5019",
    channels: [
        ChannelPins {
            in1: Pin(22),
            in2: Pin(24),
            pwm: Pin(13),
            enable: ENABLE_AB,
            status: Pin(26),
            current_sense: AnalogPin(6),
            encoder: Some(Pin(20)),
        },
        ChannelPins {
            in1: Pin(32),
            in2: Pin(34),
            pwm: Pin(5),
            enable: ENABLE_AB,
            status: Pin(36),
            current_sense: AnalogPin(7),
            encoder: Some(Pin(18)),
        },
        ChannelPins {
            in1: Pin(42),
            in2: Pin(44),
            pwm: Pin(3),
            enable: ENABLE_C,
            status: Pin(46),
            current_sense: AnalogPin(8),
            encoder: Some(Pin(19)),
        },
    ],
    polarity: Polarity::In2High,
    fault_polarity: FaultPolarity::ActiveLow,
    current_scale_ma: 34,
    encoder_pull_up: false,
    proportional_brake: true,
    battery_monitor: Some(BATTERY_MONITOR),
};
