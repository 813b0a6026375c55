use std::sync::LazyLock;
use std::time::Instant;

/// Every reading is relative to this, taken the first time the clock is read.
static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Portable clock used where we have no direct binding, and under Miri because Miri cannot
/// talk to a real OS but Rust std time still works.
pub(crate) fn clock_nanos() -> u64 {
    u64::try_from(EPOCH.elapsed().as_nanos()).unwrap_or(u64::MAX)
}
