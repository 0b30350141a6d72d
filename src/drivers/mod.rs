#[cfg(feature = "atmega328p")]
pub mod atmega328p;

#[cfg(feature = "systick")]
pub mod systick;

#[cfg(any(test, feature = "systick"))]
mod latch;

#[cfg(any(test, feature = "systick"))]
pub(crate) use self::latch::PendingLatch;
