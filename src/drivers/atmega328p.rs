//! Timer/Counter 1 of the ATmega328P.
//!
//! TC1 is a 16 bit timer. In CTC mode with `OCR1A` as TOP it counts from zero up to and including
//! `OCR1A`, raises `TIMER1_COMPA` and restarts from zero, so a period of `n` cycles is `OCR1A = n - 1`.
//!
//! The compare match vector is bound to a `static` timebase with [`timebase_interrupt`](crate::timebase_interrupt):
//!
//! ```ignore
//! #![feature(abi_avr_interrupt)]
//!
//! use ctc_timebase::{drivers::atmega328p::{Adapter, Tc1TimerDrv}, Clock, Timebase, TimebaseDrv};
//!
//! struct CpuClock;
//! impl Clock for CpuClock {
//!     const FREQ: u32 = 16_000_000;
//! }
//!
//! static TIMEBASE: TimebaseDrv<CpuClock, Tc1TimerDrv, Adapter> =
//!     TimebaseDrv::new(unsafe { Tc1TimerDrv::steal() });
//!
//! ctc_timebase::timebase_interrupt!(TIMEBASE);
//!
//! fn main() {
//!     TIMEBASE.initialize();
//!     let start = TIMEBASE.elapsed_microseconds();
//!     // ...
//!     let elapsed = TIMEBASE.micros_since(start);
//! }
//! ```

use avr_device::atmega328p::{tc1::RegisterBlock, TC1};

use crate::TimebaseTimer;

pub struct Adapter;

/// The ATmega328P TC1 timebase driver.
pub struct Tc1TimerDrv(());

impl Tc1TimerDrv {
    /// Create the driver, taking ownership of the timer.
    pub fn new(_tc1: TC1) -> Self {
        Self(())
    }

    /// Create the driver without the timer peripheral, e.g. to place a timebase in a `static`.
    ///
    /// # Safety
    ///
    /// TC1 must not be used by anything else.
    pub const unsafe fn steal() -> Self {
        Self(())
    }

    #[inline]
    fn tc1(&self) -> &RegisterBlock {
        unsafe { &*TC1::ptr() }
    }
}

impl TimebaseTimer<Adapter> for Tc1TimerDrv {
    const MAX_PERIOD: u32 = 0x1_0000;

    fn configure(&self, period: u32) {
        let tc1 = self.tc1();

        // CTC mode with OCR1A as TOP is WGM1 = 0b0100, split over TCCR1A and TCCR1B.
        tc1.tccr1a.write(|w| w.wgm1().bits(0b00));
        tc1.tccr1b.write(|w| w.wgm1().bits(0b01).cs1().direct());

        #[allow(unused_unsafe)]
        unsafe {
            tc1.ocr1a.write(|w| w.bits((period - 1) as u16));
            tc1.tcnt1.write(|w| w.bits(0));
        }

        // The flag is cleared by writing a one.
        tc1.tifr1.write(|w| w.ocf1a().set_bit());
    }

    #[inline]
    fn value(&self) -> u32 {
        self.tc1().tcnt1.read().bits() as u32
    }

    fn compare_int_enable(&self) {
        self.tc1().timsk1.write(|w| w.ocie1a().set_bit());
    }

    #[inline]
    fn is_pending_compare(&self) -> bool {
        self.tc1().tifr1.read().ocf1a().bit_is_set()
    }

    #[inline]
    fn clear_pending_compare(&self) {
        // Already cleared by hardware when TIMER1_COMPA is entered,
        // but not if the handler is invoked some other way.
        self.tc1().tifr1.write(|w| w.ocf1a().set_bit());
    }

    fn global_int_enable(&self) {
        unsafe { avr_device::interrupt::enable() };
    }
}

/// Declare the TC1 interrupt vectors for a `static` timebase.
///
/// The crate using this must enable `#![feature(abi_avr_interrupt)]` and depend on `avr-device`.
#[macro_export]
macro_rules! timebase_interrupt {
    ($timebase:ident) => {
        #[avr_device::interrupt(atmega328p)]
        fn TIMER1_COMPA() {
            $timebase.on_compare();
        }

        #[avr_device::interrupt(atmega328p)]
        fn TIMER1_OVF() {
            $timebase.on_overflow();
        }
    };
}
