use std::env;
use std::time::Duration;

use crate::pal::{Platform, PlatformFacade};

/// Name of the environment variable read by [`UserTimeMode::from_env()`].
pub const USER_TIME_ENV_VAR: &str = "TIME_LIMIT_USE_USERTIME";

/// Whether a [`TimeLimit`][crate::TimeLimit] double-checks the wall clock against the
/// processor time actually consumed before declaring the real-time limit reached.
///
/// Checking processor time is a system call, so it is only done once the wall clock predicts
/// that the limit is about to run out. If the process got less processor time than the wall
/// clock suggests (it was descheduled, throttled or paused), the limit is pushed out instead
/// of being reached. This is mainly useful for benchmarks running on busy machines, where
/// results should not depend on how much other work the machine was doing.
///
/// This is normally decided once per process, e.g. via [`UserTimeMode::from_env()`] at startup,
/// and then passed to every [`TimeLimitBuilder`][crate::TimeLimitBuilder].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum UserTimeMode {
    /// Only the wall clock decides.
    #[default]
    Disabled,

    /// Processor time consumed by all threads of the process confirms the wall clock.
    Process,

    /// Processor time consumed by the thread that created the time limit confirms the wall
    /// clock. The time limit must then be polled from that same thread.
    Thread,
}

impl UserTimeMode {
    /// Reads the mode from the `TIME_LIMIT_USE_USERTIME` environment variable.
    ///
    /// Unset, empty, `0` and `false` disable the mode, `thread` selects [`Self::Thread`] and
    /// anything else selects [`Self::Process`]. Matching is case-insensitive.
    ///
    /// Call this once at startup and reuse the result for all time limits.
    #[must_use]
    pub fn from_env() -> Self {
        env::var(USER_TIME_ENV_VAR).map_or(Self::Disabled, |value| Self::parse(&value))
    }

    fn parse(value: &str) -> Self {
        let value = value.trim();

        if value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false") {
            Self::Disabled
        } else if value.eq_ignore_ascii_case("thread") {
            Self::Thread
        } else {
            Self::Process
        }
    }

    #[must_use]
    pub(crate) fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// Measures processor time consumed since the timer was started.
#[derive(Debug)]
pub(crate) struct UserTimer {
    platform: PlatformFacade,
    mode: UserTimeMode,
    start: Duration,
}

impl UserTimer {
    pub(crate) fn start(platform: PlatformFacade, mode: UserTimeMode) -> Self {
        debug_assert!(mode.is_enabled(), "user timer started in disabled mode");

        let start = read(&platform, mode);

        Self {
            platform,
            mode,
            start,
        }
    }

    pub(crate) fn mode(&self) -> UserTimeMode {
        self.mode
    }

    pub(crate) fn elapsed_seconds(&self) -> f64 {
        read(&self.platform, self.mode)
            .saturating_sub(self.start)
            .as_secs_f64()
    }
}

fn read(platform: &PlatformFacade, mode: UserTimeMode) -> Duration {
    match mode {
        UserTimeMode::Disabled => Duration::ZERO,
        UserTimeMode::Process => platform.process_time(),
        UserTimeMode::Thread => platform.thread_time(),
    }
}
