/// The timer peripheral backing a timebase.
///
/// The timer runs in Clear Timer on Compare mode: the counter counts timer cycles from zero,
/// and is reset to zero by hardware when it reaches the end of the configured period,
/// at which point the compare interrupt is raised.
pub trait TimebaseTimer<A>: Send + Sync + 'static {
    /// The longest period supported by the counter, in timer cycles.
    const MAX_PERIOD: u32;

    /// Configure the timer to run without prescaling and raise a compare match every `period` cycles.
    /// The counter is reset to zero and any pending compare match is discarded.
    fn configure(&self, period: u32);

    /// Get the current counter value of the timer.
    /// The value must be in the interval 0 <= value < period.
    fn value(&self) -> u32;

    /// Enable the compare match interrupt.
    fn compare_int_enable(&self);

    /// Get whether a compare match has occured that is not yet handled.
    ///
    /// This is called within a critical section. Once it returns true it must keep doing so
    /// until [`TimebaseTimer::clear_pending_compare`] is called, also if the hardware clears its flag
    /// when the interrupt is entered.
    fn is_pending_compare(&self) -> bool;

    /// Clear the flag indicating that a compare match has occured.
    /// This is called within a critical section together with the tick increment.
    fn clear_pending_compare(&self);

    /// Enable global interrupt delivery.
    fn global_int_enable(&self);
}
