//! A millisecond timebase driven by a timer in Clear Timer on Compare mode.
//!
//! The timer raises a compare match interrupt every millisecond which advances the tick counter,
//! and the live counter value of the timer provides the time within the current millisecond.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "drone")]
extern crate alloc;

mod clock;
mod config;
pub mod drivers;
#[cfg(test)]
mod sim;
mod timebase;
mod timer;

pub use self::{
    clock::Clock,
    config::TimebaseConfig,
    timebase::{Timebase, TimebaseDrv, TICKS_PER_SECOND},
    timer::TimebaseTimer,
};
