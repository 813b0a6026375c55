//! Platform abstraction layer for the clock and processor time readings.
//!
//! All readings of the outside world go through the [`Platform`] trait so that tests can
//! substitute a fake platform whose time only moves when the test says so, or a mock that
//! verifies exactly which readings took place.

mod abstractions;
mod facade;
mod real;

#[cfg(all(target_os = "linux", not(miri)))]
mod linux;
#[cfg(all(target_os = "linux", not(miri)))]
pub(crate) use linux::*;

#[cfg(any(miri, not(target_os = "linux")))]
mod rust;
#[cfg(any(miri, not(target_os = "linux")))]
pub(crate) use rust::*;

#[cfg(test)]
mod fake;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
#[cfg(test)]
pub(crate) use fake::*;
pub(crate) use real::*;
