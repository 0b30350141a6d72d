use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use crate::{drivers::PendingLatch, TimebaseTimer};

pub struct Adapter;

/// A timer running in Clear Timer on Compare mode, advanced by hand.
pub struct SimTimer {
    period: AtomicU32,
    counter: AtomicU32,
    pending: AtomicBool,
    compare_int: AtomicBool,
    global_int: AtomicBool,
    configured: AtomicUsize,
}

impl SimTimer {
    pub const fn new() -> Self {
        Self {
            period: AtomicU32::new(0),
            counter: AtomicU32::new(0),
            pending: AtomicBool::new(false),
            compare_int: AtomicBool::new(false),
            global_int: AtomicBool::new(false),
            configured: AtomicUsize::new(0),
        }
    }

    /// Run the counter for `cycles` timer cycles.
    /// The counter does not run until it is configured.
    pub fn advance(&self, cycles: u32) {
        let period = self.period.load(Ordering::Relaxed);
        if period == 0 {
            return;
        }

        let counter = self.counter.load(Ordering::Relaxed) as u64 + cycles as u64;
        if counter >= period as u64 {
            // The hardware flag is a single bit, so matches beyond the first are lost.
            self.pending.store(true, Ordering::Relaxed);
        }
        self.counter
            .store((counter % period as u64) as u32, Ordering::Relaxed);
    }

    /// Run the counter up to the end of the current period, raising the compare match.
    pub fn advance_to_compare(&self) {
        let period = self.period.load(Ordering::Relaxed);
        self.advance(period - self.counter.load(Ordering::Relaxed));
    }

    pub fn period(&self) -> u32 {
        self.period.load(Ordering::Relaxed)
    }

    pub fn is_compare_int_enabled(&self) -> bool {
        self.compare_int.load(Ordering::Relaxed)
    }

    pub fn is_global_int_enabled(&self) -> bool {
        self.global_int.load(Ordering::Relaxed)
    }

    pub fn configure_count(&self) -> usize {
        self.configured.load(Ordering::Relaxed)
    }
}

impl TimebaseTimer<Adapter> for SimTimer {
    const MAX_PERIOD: u32 = 0x1_0000;

    fn configure(&self, period: u32) {
        self.period.store(period, Ordering::Relaxed);
        self.counter.store(0, Ordering::Relaxed);
        self.pending.store(false, Ordering::Relaxed);
        self.configured.fetch_add(1, Ordering::Relaxed);
    }

    fn value(&self) -> u32 {
        self.counter.load(Ordering::Relaxed)
    }

    fn compare_int_enable(&self) {
        self.compare_int.store(true, Ordering::Relaxed);
    }

    fn is_pending_compare(&self) -> bool {
        self.pending.load(Ordering::Relaxed)
    }

    fn clear_pending_compare(&self) {
        self.pending.store(false, Ordering::Relaxed);
    }

    fn global_int_enable(&self) {
        self.global_int.store(true, Ordering::Relaxed);
    }
}

/// A timer whose match flag is cleared by reading it and whose interrupt pending state is cleared
/// when the interrupt is entered, like the Cortex-M SysTick.
pub struct LatchedSimTimer {
    period: AtomicU32,
    counter: AtomicU32,
    countflag: AtomicBool,
    int_pending: AtomicBool,
    latch: PendingLatch,
}

impl LatchedSimTimer {
    pub const fn new() -> Self {
        Self {
            period: AtomicU32::new(0),
            counter: AtomicU32::new(0),
            countflag: AtomicBool::new(false),
            int_pending: AtomicBool::new(false),
            latch: PendingLatch::new(),
        }
    }

    /// Run the counter for at most one period.
    pub fn advance(&self, cycles: u32) {
        let period = self.period.load(Ordering::Relaxed);
        assert!(period > 0 && cycles <= period);

        let counter = self.counter.load(Ordering::Relaxed) + cycles;
        if counter >= period {
            self.countflag.store(true, Ordering::Relaxed);
            self.int_pending.store(true, Ordering::Relaxed);
        }
        self.counter.store(counter % period, Ordering::Relaxed);
    }

    /// Enter the interrupt, which clears its pending state. Returns whether it was pending.
    pub fn enter_int(&self) -> bool {
        self.int_pending.swap(false, Ordering::Relaxed)
    }
}

impl TimebaseTimer<Adapter> for LatchedSimTimer {
    const MAX_PERIOD: u32 = 0x100_0000;

    fn configure(&self, period: u32) {
        self.period.store(period, Ordering::Relaxed);
        self.counter.store(0, Ordering::Relaxed);
        self.countflag.store(false, Ordering::Relaxed);
        self.int_pending.store(false, Ordering::Relaxed);
        self.latch.clear();
    }

    fn value(&self) -> u32 {
        self.counter.load(Ordering::Relaxed)
    }

    fn compare_int_enable(&self) {}

    fn is_pending_compare(&self) -> bool {
        self.latch
            .update(self.countflag.swap(false, Ordering::Relaxed))
    }

    fn clear_pending_compare(&self) {
        self.countflag.store(false, Ordering::Relaxed);
        self.latch.clear();
    }

    fn global_int_enable(&self) {}
}
