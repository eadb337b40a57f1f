// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Current-sense and battery sampling on the STM32F7 ADCs, via direct PAC register access.
//!
//! The converters run at 10-bit resolution so raw counts land on the same 0..=1023 scale the
//! board current factors were derived for.
//!
//! Example:
//! ```no_run
//! let mut adc1 = Adc::adc1(dp.ADC1);
//! let fb = adc1.read_channel(14);
//! ```

use stm32f7xx_hal::pac;

/// Blocking single-channel read from an ADC peripheral.
pub trait AdcRead {
    fn read_channel(&mut self, ch: u8) -> u16;
}

/// Generic ADC wrapper over a PAC ADCx peripheral.
pub struct Adc<ADC> {
    adc: ADC,
}

impl<ADC> Adc<ADC> {
    #[inline]
    pub fn free(self) -> ADC {
        self.adc
    }
}

fn configure_common() {
    let common = unsafe { &*pac::ADC_COMMON::ptr() };

    // ADC prescaler: PCLK2 / 4
    common.ccr.modify(|_, w| w.adcpre().div4());
}

fn init_10bit(adc: &pac::adc1::RegisterBlock) {
    adc.cr2.modify(|_, w| w.adon().clear_bit());

    // 10-bit, right-aligned, software trigger
    adc.cr1.modify(|_, w| w.res().bits(0b01));
    adc.cr2.modify(|_, w| {
        w.cont().clear_bit();
        w.align().right();
        w.exten().disabled();
        w
    });

    adc.cr2.modify(|_, w| w.adon().set_bit());
}

/// Longest sample time on `channel`. The FB outputs are high impedance.
fn set_long_sample_time(adc: &pac::adc1::RegisterBlock, channel: u8) {
    match channel {
        0..=9 => adc.smpr2.modify(|_, w| match channel {
            0 => w.smp0().bits(0b111),
            1 => w.smp1().bits(0b111),
            2 => w.smp2().bits(0b111),
            3 => w.smp3().bits(0b111),
            4 => w.smp4().bits(0b111),
            5 => w.smp5().bits(0b111),
            6 => w.smp6().bits(0b111),
            7 => w.smp7().bits(0b111),
            8 => w.smp8().bits(0b111),
            _ => w.smp9().bits(0b111),
        }),
        10..=18 => adc.smpr1.modify(|_, w| match channel {
            10 => w.smp10().bits(0b111),
            11 => w.smp11().bits(0b111),
            12 => w.smp12().bits(0b111),
            13 => w.smp13().bits(0b111),
            14 => w.smp14().bits(0b111),
            15 => w.smp15().bits(0b111),
            16 => w.smp16().bits(0b111),
            17 => w.smp17().bits(0b111),
            _ => w.smp18().bits(0b111),
        }),
        _ => {}
    }
}

fn convert(adc: &pac::adc1::RegisterBlock, channel: u8) -> u16 {
    set_long_sample_time(adc, channel);

    // One conversion on `channel`
    adc.sqr1.modify(|_, w| w.l().bits(0));
    adc.sqr3
        .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

    adc.cr2.modify(|_, w| w.swstart().set_bit());
    while adc.sr.read().eoc().bit_is_clear() {}

    adc.dr.read().data().bits() & 0x03FF
}

impl Adc<pac::ADC1> {
    /// Create and initialize ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        configure_common();
        init_10bit(&adc1);

        Self { adc: adc1 }
    }
}

impl Adc<pac::ADC3> {
    /// Create and initialize ADC3.
    pub fn adc3(adc3: pac::ADC3) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc3en().set_bit());

        configure_common();
        init_10bit(&adc3);

        Self { adc: adc3 }
    }
}

impl AdcRead for Adc<pac::ADC1> {
    fn read_channel(&mut self, ch: u8) -> u16 {
        convert(&self.adc, ch)
    }
}

impl AdcRead for Adc<pac::ADC3> {
    fn read_channel(&mut self, ch: u8) -> u16 {
        convert(&self.adc, ch)
    }
}
