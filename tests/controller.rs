use std::collections::HashMap;

use trimotor::boards::{pololu_big, three_motor};
use trimotor::{
    AnalogPin, Channel, DriverConfig, Error, Group, Level, Mode, MotorController, MotorHal, Pin,
    PinMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Configure(Pin, PinMode),
    Write(Pin, Level),
    Duty(Pin, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WrongMode(Pin);

/// Records every call in order and keeps the latest level/duty per line.
#[derive(Default)]
struct RecordingHal {
    /// Inputs wired without a pull-up; asking for one fails like a real header would.
    floating_only: Vec<Pin>,
    events: Vec<Event>,
    levels: HashMap<Pin, Level>,
    duty: HashMap<Pin, u8>,
    analog: HashMap<AnalogPin, u16>,
}

impl MotorHal for RecordingHal {
    type Error = WrongMode;

    fn configure(&mut self, pin: Pin, mode: PinMode) -> Result<(), Self::Error> {
        if mode == PinMode::InputPullUp && self.floating_only.contains(&pin) {
            return Err(WrongMode(pin));
        }
        self.events.push(Event::Configure(pin, mode));
        Ok(())
    }

    fn write(&mut self, pin: Pin, level: Level) -> Result<(), Self::Error> {
        self.events.push(Event::Write(pin, level));
        self.levels.insert(pin, level);
        Ok(())
    }

    fn read(&mut self, pin: Pin) -> Result<Level, Self::Error> {
        Ok(self.levels.get(&pin).copied().unwrap_or(Level::High))
    }

    fn set_duty(&mut self, pin: Pin, duty: u8) -> Result<(), Self::Error> {
        self.events.push(Event::Duty(pin, duty));
        self.duty.insert(pin, duty);
        Ok(())
    }

    fn read_analog(&mut self, pin: AnalogPin) -> Result<u16, Self::Error> {
        Ok(self.analog.get(&pin).copied().unwrap_or(0))
    }
}

fn controller(config: DriverConfig) -> MotorController<RecordingHal> {
    MotorController::new(RecordingHal::default(), config).unwrap()
}

fn enable_writes(hal: &RecordingHal, enable: Pin, since: usize) -> Vec<Level> {
    hal.events[since..]
        .iter()
        .filter_map(|e| match *e {
            Event::Write(pin, level) if pin == enable => Some(level),
            _ => None,
        })
        .collect()
}

#[test]
fn construction_configures_before_driving() {
    let ctl = controller(three_motor::CONFIG);
    let events = &ctl.hal().events;

    let last_configure = events
        .iter()
        .rposition(|e| matches!(e, Event::Configure(..)))
        .unwrap();
    let first_drive = events
        .iter()
        .position(|e| !matches!(e, Event::Configure(..)))
        .unwrap();
    assert!(last_configure < first_drive);

    // Enables go low before any direction line is latched.
    assert_eq!(
        events[first_drive],
        Event::Write(three_motor::ENABLE_AB, Level::Low)
    );
}

#[test]
fn set_speeds_asserts_shared_enable_once() {
    let mut ctl = controller(pololu_big::CONFIG);
    let mark = ctl.hal().events.len();

    ctl.set_speeds(Group::AB, -200, 150).unwrap();

    let hal = ctl.hal();
    assert_eq!(
        enable_writes(hal, pololu_big::ENABLE_AB, mark),
        vec![Level::High]
    );
    assert!(enable_writes(hal, pololu_big::ENABLE_C, mark).is_empty());
    assert_eq!(ctl.mode(Channel::A), Mode::Reverse(200));
    assert_eq!(ctl.mode(Channel::B), Mode::Forward(150));

    // Both duties land before the enable is raised.
    let enable_at = hal.events[mark..]
        .iter()
        .position(|e| *e == Event::Write(pololu_big::ENABLE_AB, Level::High))
        .unwrap();
    let duties = hal.events[mark..mark + enable_at]
        .iter()
        .filter(|e| matches!(e, Event::Duty(..)))
        .count();
    assert_eq!(duties, 2);
}

#[test]
fn pololu_forward_is_in2_high() {
    let mut ctl = controller(pololu_big::CONFIG);
    ctl.set_speed(Channel::C, 75).unwrap();

    let pins = pololu_big::CONFIG.channels[2];
    let hal = ctl.hal();
    assert_eq!(hal.levels[&pins.in1], Level::Low);
    assert_eq!(hal.levels[&pins.in2], Level::High);
    assert_eq!(hal.levels[&pins.enable], Level::High);
    assert_eq!(hal.duty[&pins.pwm], 75);
    assert_eq!(ctl.mode(Channel::C), Mode::Forward(75));
}

#[test]
fn brakes_only_touch_their_group() {
    let mut ctl = controller(three_motor::CONFIG);
    ctl.set_speeds(Group::AB, 100, 100).unwrap();
    ctl.set_speed(Channel::C, -100).unwrap();

    ctl.set_brakes(Group::C).unwrap();

    assert_eq!(ctl.mode(Channel::A), Mode::Forward(100));
    assert_eq!(ctl.mode(Channel::B), Mode::Forward(100));
    assert_eq!(ctl.mode(Channel::C), Mode::Brake);
    assert_eq!(ctl.hal().levels[&three_motor::ENABLE_C], Level::Low);
    assert_eq!(ctl.hal().levels[&three_motor::ENABLE_AB], Level::High);
}

#[test]
fn mode_is_recomputed_by_every_command() {
    let mut ctl = controller(three_motor::CONFIG);
    let script: [(fn(&mut MotorController<RecordingHal>), Mode); 5] = [
        (|c| c.set_speed(Channel::B, 40).unwrap(), Mode::Forward(40)),
        (|c| c.set_coast(Channel::B).unwrap(), Mode::Coast),
        (|c| c.set_speed(Channel::B, -1000).unwrap(), Mode::Reverse(255)),
        (|c| c.set_brakes(Group::AB).unwrap(), Mode::Brake),
        (|c| c.set_speed(Channel::B, 0).unwrap(), Mode::Forward(0)),
    ];
    for (command, expected) in script {
        command(&mut ctl);
        assert_eq!(ctl.mode(Channel::B), expected);
    }
}

#[test]
fn unfaulted_board_reads_high_status() {
    let mut ctl = controller(pololu_big::CONFIG);
    for ch in Channel::ALL {
        assert_eq!(ctl.status(ch).unwrap(), Level::High);
        assert!(!ctl.is_faulted(ch).unwrap());
    }
}

#[test]
fn currents_use_board_scale() {
    let mut ctl = controller(three_motor::CONFIG);
    ctl.hal_mut().analog.insert(AnalogPin(8), 250);
    assert_eq!(ctl.currents().unwrap(), [0, 0, 2500]);
}

#[test]
fn encoder_lines_request_the_board_pull_up() {
    let custom = controller(three_motor::CONFIG);
    let pololu = controller(pololu_big::CONFIG);

    for (ctl, expected) in [(&custom, PinMode::InputPullUp), (&pololu, PinMode::Input)] {
        for pins in ctl.config().channels {
            let encoder = pins.encoder.unwrap();
            assert!(ctl
                .hal()
                .events
                .contains(&Event::Configure(encoder, expected)));
        }
    }
}

#[test]
fn missing_pull_up_fails_construction() {
    let encoder = three_motor::CONFIG.channels[1].encoder.unwrap();
    let hal = RecordingHal {
        floating_only: vec![encoder],
        ..RecordingHal::default()
    };
    match MotorController::new(hal, three_motor::CONFIG) {
        Err(Error::Hal(WrongMode(pin))) => assert_eq!(pin, encoder),
        other => panic!("expected a HAL error, got ok={}", other.is_ok()),
    }

    // Without pull-ups requested, the same wiring is fine.
    let encoder = pololu_big::CONFIG.channels[1].encoder.unwrap();
    let hal = RecordingHal {
        floating_only: vec![encoder],
        ..RecordingHal::default()
    };
    assert!(MotorController::new(hal, pololu_big::CONFIG).is_ok());
}
