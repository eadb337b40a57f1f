#![no_main]
#![no_std]

use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    timer::{Channel1, Channel2, Channel3},
};
use stm32f7xx_hal as hal;

use trimotor::boards::DEFAULT;
use trimotor::hw::adc::Adc;
use trimotor::hw::header::{Header, InputLine, PwmLine};
use trimotor::{Channel, Group, MotorController};

/// Control loop period in core cycles (about 20 ms at 216 MHz).
const LOOP_CYCLES: u32 = 4_320_000;

/// Drive current above which the drive pair is stopped.
const STALL_MA: u32 = 6_000;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(216.MHz()).freeze();

    // GPIO
    let gpioa = dp.GPIOA.split();
    let gpioc = dp.GPIOC.split();
    let gpiod = dp.GPIOD.split();
    let gpioe = dp.GPIOE.split();

    let [a, b, c] = DEFAULT.channels;

    // Direction and enable lines
    let outputs = [
        (a.in1, gpioe.pe2.into_push_pull_output().erase()),
        (a.in2, gpioe.pe3.into_push_pull_output().erase()),
        (b.in1, gpioe.pe5.into_push_pull_output().erase()),
        (b.in2, gpioe.pe6.into_push_pull_output().erase()),
        (c.in1, gpioe.pe7.into_push_pull_output().erase()),
        (c.in2, gpioe.pe8.into_push_pull_output().erase()),
        (a.enable, gpioa.pa3.into_push_pull_output().erase()),
        (c.enable, gpiod.pd1.into_push_pull_output().erase()),
    ];

    // Encoder lines, with the internal pull-ups if the board wants them
    let (enc_a, enc_b, enc_c) = if DEFAULT.encoder_pull_up {
        (
            InputLine::PullUp(gpioa.pa0.into_pull_up_input().erase()),
            InputLine::PullUp(gpioa.pa1.into_pull_up_input().erase()),
            InputLine::PullUp(gpioa.pa6.into_pull_up_input().erase()),
        )
    } else {
        (
            InputLine::Floating(gpioa.pa0.into_floating_input().erase()),
            InputLine::Floating(gpioa.pa1.into_floating_input().erase()),
            InputLine::Floating(gpioa.pa6.into_floating_input().erase()),
        )
    };

    // Status flags are pulled up on the driver boards
    let inputs = [
        (a.status, InputLine::Floating(gpioa.pa2.into_floating_input().erase())),
        (b.status, InputLine::Floating(gpiod.pd0.into_floating_input().erase())),
        (c.status, InputLine::Floating(gpiod.pd3.into_floating_input().erase())),
        (a.encoder.unwrap(), enc_a),
        (b.encoder.unwrap(), enc_b),
        (c.encoder.unwrap(), enc_c),
    ];

    // TIM4 CH1..CH3 on PD12..PD14
    let channels = (
        Channel1::new(gpiod.pd12),
        Channel2::new(gpiod.pd13),
        Channel3::new(gpiod.pd14),
    );
    let (mut pwm_a, mut pwm_b, mut pwm_c) = dp.TIM4.pwm_hz(channels, 8.kHz(), &clocks).split();
    let pwm: [(_, PwmLine); 3] = [(a.pwm, &mut pwm_a), (b.pwm, &mut pwm_b), (c.pwm, &mut pwm_c)];

    // FB outputs and the battery tap on ADC1
    let _fb = (
        gpioc.pc4.into_analog(),
        gpioc.pc5.into_analog(),
        gpioc.pc2.into_analog(),
        gpioc.pc3.into_analog(),
    );
    #[cfg(not(feature = "pololu-big"))]
    let analog = [(a.current_sense, 14), (b.current_sense, 15), (c.current_sense, 12)];
    #[cfg(feature = "pololu-big")]
    let analog = [
        (a.current_sense, 14),
        (b.current_sense, 15),
        (c.current_sense, 12),
        (trimotor::boards::pololu_big::BATTERY_MONITOR, 13),
    ];
    let adc = Adc::adc1(dp.ADC1);

    let header = Header::new(outputs, inputs, pwm, analog, adc);
    let mut motors = MotorController::new(header, DEFAULT).unwrap();

    // Creep forward on the drive pair, stop it on a fault or a stall.
    if let Err(e) = motors.set_speeds(Group::AB, 60, 60) {
        defmt::error!("start failed: {}", e);
    }

    loop {
        let faulted = Channel::ALL
            .iter()
            .any(|&ch| motors.is_faulted(ch).unwrap_or(true));
        let stalled = motors
            .currents()
            .map(|ma| ma[..2].iter().any(|&i| i > STALL_MA))
            .unwrap_or(true);

        if faulted || stalled {
            defmt::warn!("stopping: faulted={} stalled={}", faulted, stalled);
            for group in Group::ALL {
                if let Err(e) = motors.set_brakes(group) {
                    defmt::error!("brake {} failed: {}", group, e);
                }
            }
        }

        cortex_m::asm::delay(LOOP_CYCLES);
    }
}
