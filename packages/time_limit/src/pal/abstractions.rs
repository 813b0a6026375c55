use std::fmt::Debug;
use std::time::Duration;

/// The readings a time limit needs from the outside world.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Nanoseconds since an arbitrary fixed epoch. Never decreases and must be cheap,
    /// as it is read on every poll of a time limit.
    fn monotonic_nanos(&self) -> u64;

    /// Processor time consumed by the whole process so far.
    fn process_time(&self) -> Duration;

    /// Processor time consumed by the calling thread so far.
    fn thread_time(&self) -> Duration;
}
