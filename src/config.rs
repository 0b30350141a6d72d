/// Options applied by [`TimebaseDrv::initialize_with`](crate::TimebaseDrv::initialize_with).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimebaseConfig {
    /// Globally enable interrupt delivery once the timer is configured.
    ///
    /// Clear this when interrupts are enabled by the application after all peripherals are set up.
    pub enable_interrupts: bool,
}

impl TimebaseConfig {
    /// The configuration used by [`TimebaseDrv::initialize`](crate::TimebaseDrv::initialize).
    ///
    /// Interrupts are enabled unless the `deferred-int-enable` feature is set.
    pub const DEFAULT: Self = Self {
        enable_interrupts: !cfg!(feature = "deferred-int-enable"),
    };

    /// Leave global interrupt enable to the caller.
    pub const fn deferred() -> Self {
        Self {
            enable_interrupts: false,
        }
    }
}

impl Default for TimebaseConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
