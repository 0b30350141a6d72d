use core::sync::atomic::{AtomicBool, Ordering};

/// Keeps a compare match pending for timers whose hardware flag does not stay set until it is handled,
/// e.g. because it is cleared by reading it or by entering the interrupt.
///
/// All access must happen within a critical section.
pub(crate) struct PendingLatch(AtomicBool);

impl PendingLatch {
    pub(crate) const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Record the hardware flag and get whether a compare match is pending.
    #[inline]
    pub(crate) fn update(&self, flag: bool) -> bool {
        if flag {
            self.0.store(true, Ordering::Relaxed);
        }
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}
