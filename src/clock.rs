pub trait Clock: Send + Sync + 'static {
    /// The peripheral clock frequency, i.e. the number of timer cycles per second.
    const FREQ: u32;
}
