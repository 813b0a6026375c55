//! Real platform implementation using operating system clocks.

use std::time::Duration;

use cpu_time::{ProcessTime, ThreadTime};

use crate::pal::{Platform, clock_nanos};

/// Real implementation of the platform abstraction.
///
/// Processor time comes from the `cpu_time` package, which reports user plus system time.
#[derive(Clone, Debug)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    #[inline]
    fn monotonic_nanos(&self) -> u64 {
        clock_nanos()
    }

    fn process_time(&self) -> Duration {
        ProcessTime::now().as_duration()
    }

    fn thread_time(&self) -> Duration {
        ThreadTime::now().as_duration()
    }
}
