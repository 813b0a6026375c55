//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::Platform;

/// Arbitrary nonzero starting point, so that code under test cannot get away with
/// assuming the clock epoch is zero.
const INITIAL_NANOS: u64 = 1_000_000_000_000;

#[derive(Debug)]
struct FakePlatformState {
    nanos: u64,
    process_time: Duration,
    thread_time: Duration,
}

/// Platform whose time only moves when the test moves it.
///
/// Clones share the same state, so a test can keep one clone and hand another to the code
/// under test, then advance time between calls.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    state: Arc<Mutex<FakePlatformState>>,
}

impl FakePlatform {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePlatformState {
                nanos: INITIAL_NANOS,
                process_time: Duration::ZERO,
                thread_time: Duration::ZERO,
            })),
        }
    }

    pub(crate) fn advance_clock(&self, duration: Duration) {
        let mut state = self
            .state
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        state.nanos = state
            .nanos
            .checked_add(
                u64::try_from(duration.as_nanos()).expect("test durations are far below u64"),
            )
            .expect("fake clock overflow means a broken test");
    }

    /// Advances the wall clock and both processor time readings by the same amount,
    /// as if the process were running flat out on one thread.
    pub(crate) fn advance_busy(&self, duration: Duration) {
        self.advance_clock(duration);

        let mut state = self
            .state
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        state.process_time = state.process_time.saturating_add(duration);
        state.thread_time = state.thread_time.saturating_add(duration);
    }

    pub(crate) fn set_process_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .process_time = time;
    }

    pub(crate) fn set_thread_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .thread_time = time;
    }
}

impl Platform for FakePlatform {
    fn monotonic_nanos(&self) -> u64 {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .nanos
    }

    fn process_time(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .process_time
    }

    fn thread_time(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .thread_time
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn starts_with_zero_processor_time() {
        let platform = FakePlatform::new();

        assert_eq!(platform.monotonic_nanos(), INITIAL_NANOS);
        assert_eq!(platform.process_time(), Duration::ZERO);
        assert_eq!(platform.thread_time(), Duration::ZERO);
    }

    #[test]
    fn advance_clock_leaves_processor_time_alone() {
        let platform = FakePlatform::new();
        platform.advance_clock(Duration::from_millis(150));

        assert_eq!(platform.monotonic_nanos(), INITIAL_NANOS + 150_000_000);
        assert_eq!(platform.process_time(), Duration::ZERO);
    }

    #[test]
    fn advance_busy_moves_everything() {
        let platform = FakePlatform::new();
        platform.advance_busy(Duration::from_millis(10));

        assert_eq!(platform.monotonic_nanos(), INITIAL_NANOS + 10_000_000);
        assert_eq!(platform.process_time(), Duration::from_millis(10));
        assert_eq!(platform.thread_time(), Duration::from_millis(10));
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        platform1.advance_clock(Duration::from_secs(1));
        assert_eq!(platform2.monotonic_nanos(), INITIAL_NANOS + 1_000_000_000);

        platform2.set_process_time(Duration::from_millis(200));
        assert_eq!(platform1.process_time(), Duration::from_millis(200));

        platform1.set_thread_time(Duration::from_millis(300));
        assert_eq!(platform2.thread_time(), Duration::from_millis(300));
    }
}
