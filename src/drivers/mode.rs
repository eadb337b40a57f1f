// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Channel addressing and drive modes.

/// Highest PWM duty accepted by the driver boards.
pub const MAX_DUTY: u8 = 255;

/// One motor output of the driver board.
///
/// By board convention A is the left drive motor, B the right drive motor and C the camera motor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    A,
    B,
    C,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::A, Channel::B, Channel::C];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
            Channel::C => 2,
        }
    }

    /// The enable group this channel belongs to.
    #[inline]
    pub const fn group(self) -> Group {
        match self {
            Channel::A | Channel::B => Group::AB,
            Channel::C => Group::C,
        }
    }
}

/// Channels that share one enable line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Group {
    /// Drive motors A and B behind the shared `ENABLEAB` line.
    AB,
    /// Motor C on its own `ENABLEC` line.
    C,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::AB, Group::C];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Group::AB => 0,
            Group::C => 1,
        }
    }

    pub const fn members(self) -> &'static [Channel] {
        match self {
            Group::AB => &[Channel::A, Channel::B],
            Group::C => &[Channel::C],
        }
    }
}

/// Direction of travel selected by the direction-line pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Reverse,
}

/// Last commanded state of a channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Forward polarity at the given duty.
    Forward(u8),
    /// Reverse polarity at the given duty.
    Reverse(u8),
    /// Drive power removed, or both bridge halves pulled to ground.
    Brake,
    /// Outputs left floating.
    Coast,
}

impl Mode {
    /// Driving mode for a direction of travel.
    #[inline]
    pub const fn driving(direction: Direction, duty: u8) -> Mode {
        match direction {
            Direction::Forward => Mode::Forward(duty),
            Direction::Reverse => Mode::Reverse(duty),
        }
    }
}

/// Split a signed speed command into a direction and a saturated duty.
///
/// Zero maps to forward: a stopped channel keeps its forward latch.
#[inline]
pub fn split_speed(speed: i16) -> (Direction, u8) {
    let direction = if speed < 0 {
        Direction::Reverse
    } else {
        Direction::Forward
    };
    (direction, saturate(speed))
}

/// Magnitude of `value`, clamped to `MAX_DUTY`.
#[inline]
pub fn saturate(value: i16) -> u8 {
    value.unsigned_abs().min(MAX_DUTY as u16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_speed_in_range() {
        for speed in -255i16..=255 {
            let (dir, duty) = split_speed(speed);
            assert_eq!(duty as i16, speed.abs());
            assert_eq!(dir == Direction::Forward, speed >= 0);
        }
    }

    #[test]
    fn split_speed_saturates() {
        assert_eq!(split_speed(300), (Direction::Forward, 255));
        assert_eq!(split_speed(-300), (Direction::Reverse, 255));
        assert_eq!(split_speed(i16::MAX), (Direction::Forward, 255));
        assert_eq!(split_speed(i16::MIN), (Direction::Reverse, 255));
    }

    #[test]
    fn zero_speed_is_forward() {
        assert_eq!(split_speed(0), (Direction::Forward, 0));
    }

    #[test]
    fn groups_cover_each_channel_once() {
        for ch in Channel::ALL {
            let hits = Group::ALL
                .iter()
                .filter(|g| g.members().contains(&ch))
                .count();
            assert_eq!(hits, 1);
            assert!(ch.group().members().contains(&ch));
        }
    }

    #[test]
    fn driving_mode_follows_direction() {
        assert_eq!(Mode::driving(Direction::Reverse, 40), Mode::Reverse(40));
        assert_eq!(Mode::driving(Direction::Forward, 0), Mode::Forward(0));
    }
}
