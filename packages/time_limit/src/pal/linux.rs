use std::{io, mem};

use libc::{CLOCK_MONOTONIC, timespec};

/// Reads `CLOCK_MONOTONIC`, which the kernel serves from the vDSO without a system call.
///
/// Unlike `CLOCK_MONOTONIC_COARSE`, this has sub-microsecond resolution, which the interval
/// prediction of a time limit depends on.
#[expect(
    clippy::cast_sign_loss,
    reason = "monotonic clock readings are never negative"
)]
pub(crate) fn clock_nanos() -> u64 {
    // SAFETY: All-zero is a valid initial value for this type.
    let mut ts: timespec = unsafe { mem::zeroed() };

    // SAFETY: We are passing valid arguments, no other safety requirements.
    let result = unsafe { libc::clock_gettime(CLOCK_MONOTONIC, &raw mut ts) };

    assert!(result == 0, "{}", io::Error::last_os_error());

    // Seconds since boot fit comfortably: u64 nanoseconds last for over 580 years.
    (ts.tv_sec as u64)
        .saturating_mul(1_000_000_000)
        .saturating_add(ts.tv_nsec as u64)
}
