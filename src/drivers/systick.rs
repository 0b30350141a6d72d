//! Cortex-M SysTick.
//!
//! SysTick reloads itself when it counts down to zero, which makes it a CTC timer.
//! Bind the `sys_tick` thread with [`TimebaseDrv::attach`](crate::TimebaseDrv::attach).
//!
//! The crate has no critical section implementation for Cortex-M. An application without
//! the `cortex-m` runtime, e.g. Drone OS, must register one with `critical_section::set_impl!`,
//! otherwise it fails to link.

use drone_cortexm::{map::periph::sys_tick::SysTickPeriph, reg::prelude::*};

use super::PendingLatch;
use crate::TimebaseTimer;

pub struct Adapter;

/// A cortex SysTick timebase driver.
pub struct SysTickTimerDrv(SysTickPeriph, PendingLatch);

impl SysTickTimerDrv {
    pub fn new(systick: SysTickPeriph) -> Self {
        Self(systick, PendingLatch::new())
    }
}

impl TimebaseTimer<Adapter> for SysTickTimerDrv {
    const MAX_PERIOD: u32 = 0x100_0000; // SysTick is a 24 bit counter.

    fn configure(&self, period: u32) {
        self.0.stk_ctrl.modify(|r| r.clear_enable());
        self.0.stk_load.store(|r| r.write_reload(period - 1));
        // Any write clears the current value and COUNTFLAG.
        self.0.stk_val.store(|r| r.write_current(0));
        self.1.clear();
        self.0.stk_ctrl.modify(|r| r.set_clksource().set_enable());
    }

    fn value(&self) -> u32 {
        // SysTick counts down, but the returned counter value must count up.
        self.0.stk_load.load_bits() as u32 - self.0.stk_val.load_bits() as u32
    }

    fn compare_int_enable(&self) {
        // Counting down to 0 triggers the SysTick interrupt
        self.0.stk_ctrl.modify(|r| r.set_tickint());
    }

    fn is_pending_compare(&self) -> bool {
        // PENDSTSET is cleared when the exception is entered, before the tick is counted,
        // and COUNTFLAG is cleared by reading it, so neither stays set until the match is handled.
        // Latch COUNTFLAG until the tick is counted.
        self.1.update(self.0.stk_ctrl.countflag.read_bit())
    }

    fn clear_pending_compare(&self) {
        // Consume COUNTFLAG in case no reader has seen this match.
        self.0.stk_ctrl.countflag.read_bit();
        self.1.clear();
    }

    fn global_int_enable(&self) {
        #[cfg(target_arch = "arm")]
        unsafe {
            core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
            core::arch::asm!("cpsie i", options(nomem, nostack));
        }
    }
}
