use core::{cell::Cell, marker::PhantomData};
use critical_section::Mutex;

use crate::{Clock, TimebaseConfig, TimebaseTimer};

/// The number of ticks per second, i.e. the compare match rate.
pub const TICKS_PER_SECOND: u32 = 1_000;

const MICROS_PER_TICK: u32 = 1_000;

/// Elapsed time since a timebase was initialized.
///
/// Both counters wrap silently: milliseconds after about 49 days, microseconds after about 71 minutes.
/// Use [`Timebase::millis_since`] and [`Timebase::micros_since`] to compute durations across a wrap.
pub trait Timebase {
    /// Get the number of milliseconds elapsed since initialization.
    fn elapsed_milliseconds(&self) -> u32;

    /// Get the number of microseconds elapsed since initialization.
    fn elapsed_microseconds(&self) -> u32;

    /// Get the number of milliseconds elapsed since the `earlier` sample.
    fn millis_since(&self, earlier: u32) -> u32 {
        self.elapsed_milliseconds().wrapping_sub(earlier)
    }

    /// Get the number of microseconds elapsed since the `earlier` sample.
    fn micros_since(&self, earlier: u32) -> u32 {
        self.elapsed_microseconds().wrapping_sub(earlier)
    }
}

/// A timebase driven by a timer in Clear Timer on Compare mode.
///
/// The timer raises a compare match every millisecond, and [`TimebaseDrv::on_compare`]
/// must be called from the compare match interrupt.
pub struct TimebaseDrv<C: Clock, Tim: TimebaseTimer<A>, A> {
    clock: PhantomData<C>,
    timer: Tim,
    /// The number of compare matches since initialization.
    millis: Mutex<Cell<u32>>,
    /// The number of timer cycles per microsecond, zero until initialized.
    micros_divisor: Mutex<Cell<u32>>,
    adapter: PhantomData<A>,
}

impl<C: Clock, Tim: TimebaseTimer<A>, A> TimebaseDrv<C, Tim, A> {
    /// The number of timer cycles between compare matches.
    pub const PERIOD: u32 = {
        let period = C::FREQ / TICKS_PER_SECOND;
        assert!(
            period > 0 && period <= Tim::MAX_PERIOD,
            "the timer cannot count one millisecond at this clock frequency"
        );
        period
    };

    /// The number of timer cycles per microsecond.
    pub const MICROS_DIVISOR: u32 = {
        assert!(
            C::FREQ >= 1_000_000,
            "the clock frequency must be at least 1MHz"
        );
        C::FREQ / 1_000_000
    };

    /// Create a new timebase that is not yet running.
    /// All queries return zero until [`TimebaseDrv::initialize`] is called.
    pub const fn new(timer: Tim) -> Self {
        Self {
            clock: PhantomData,
            timer,
            millis: Mutex::new(Cell::new(0)),
            micros_divisor: Mutex::new(Cell::new(0)),
            adapter: PhantomData,
        }
    }

    /// Start the timebase, see [`TimebaseDrv::initialize_with`].
    pub fn initialize(&self) {
        self.initialize_with(TimebaseConfig::DEFAULT);
    }

    /// Start the timebase, or restart it from zero if it is already running.
    ///
    /// This must be called before any other context starts to use the timebase.
    pub fn initialize_with(&self, config: TimebaseConfig) {
        let period = Self::PERIOD;
        let micros_divisor = Self::MICROS_DIVISOR;

        critical_section::with(|cs| {
            self.timer.configure(period);
            self.micros_divisor.borrow(cs).set(micros_divisor);
            self.millis.borrow(cs).set(0);
        });

        self.timer.compare_int_enable();

        #[cfg(feature = "log")]
        log::debug!(
            "Timebase started with a period of {} cycles and {} cycles per microsecond",
            period,
            micros_divisor
        );

        if config.enable_interrupts {
            self.timer.global_int_enable();
        } else {
            #[cfg(feature = "log")]
            log::trace!("Global interrupt enable is left to the caller");
        }
    }

    /// Handle a compare match. Call this from the compare match interrupt.
    pub fn on_compare(&self) {
        critical_section::with(|cs| {
            if self.micros_divisor.borrow(cs).get() == 0 {
                return;
            }

            // Clear the flag with the increment so that readers never count the same match twice.
            self.timer.clear_pending_compare();
            let millis = self.millis.borrow(cs);
            millis.set(millis.get().wrapping_add(1));
        });
    }

    /// Handle a counter overflow. The counter is reset on compare so this has no meaning for the timebase.
    #[inline]
    pub fn on_overflow(&self) {}

    /// Get whether the timebase has been initialized.
    pub fn is_running(&self) -> bool {
        self.micros_divisor() != 0
    }

    /// Get the number of timer cycles per microsecond, or zero if not yet initialized.
    pub fn micros_divisor(&self) -> u32 {
        critical_section::with(|cs| self.micros_divisor.borrow(cs).get())
    }

    /// Get the underlying timer.
    pub fn timer(&self) -> &Tim {
        &self.timer
    }
}

impl<C: Clock, Tim: TimebaseTimer<A>, A> Timebase for TimebaseDrv<C, Tim, A> {
    fn elapsed_milliseconds(&self) -> u32 {
        critical_section::with(|cs| self.millis.borrow(cs).get())
    }

    fn elapsed_microseconds(&self) -> u32 {
        critical_section::with(|cs| {
            let micros_divisor = self.micros_divisor.borrow(cs).get();
            if micros_divisor == 0 {
                return 0;
            }

            let mut millis = self.millis.borrow(cs).get();
            let mut counter = self.timer.value();
            if self.timer.is_pending_compare() {
                // The counter has been reset but the interrupt is not yet handled.
                // The counter may have been read before or after the reset, so read it again.
                counter = self.timer.value();
                millis = millis.wrapping_add(1);
            }

            let micros = (counter / micros_divisor).min(MICROS_PER_TICK - 1);
            millis.wrapping_mul(MICROS_PER_TICK).wrapping_add(micros)
        })
    }
}

#[cfg(feature = "drone")]
mod drone {
    use alloc::sync::Arc;
    use drone_core::{fib, thr::prelude::*, thr::ThrToken};

    use super::TimebaseDrv;
    use crate::{Clock, TimebaseTimer};

    impl<C, Tim, A> TimebaseDrv<C, Tim, A>
    where
        C: Clock,
        Tim: TimebaseTimer<A>,
        A: Send + Sync + 'static,
    {
        /// Handle compare matches on the timer interrupt thread.
        ///
        /// Every run of the thread counts as one compare match, so the thread must not be shared
        /// with other timer events. The handler completes when the timebase is dropped.
        pub fn attach<TimerInt: ThrToken>(self: &Arc<Self>, timer_int: TimerInt) {
            let timebase = Arc::downgrade(self);
            timer_int.add_fn(move || match timebase.upgrade() {
                Some(timebase) => {
                    timebase.on_compare();
                    fib::Yielded(())
                }
                None => fib::Complete(()),
            });
        }
    }
}
