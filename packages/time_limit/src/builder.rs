use std::time::Duration;

use crate::pal::PlatformFacade;
use crate::{TimeLimit, UserTimeMode};

/// Configures and creates a [`TimeLimit`].
///
/// Both limits default to infinity and user time mode defaults to disabled. The elapsed time
/// limit starts counting when [`build()`][Self::build] is called, not when the builder is
/// created.
///
/// # Examples
///
/// ```
/// use time_limit::TimeLimit;
///
/// let mut time_limit = TimeLimit::builder().deterministic_limit(2.0).build();
///
/// time_limit.advance_deterministic_time(2.0);
/// assert!(time_limit.reached());
/// ```
#[derive(Debug)]
#[must_use]
pub struct TimeLimitBuilder {
    platform: PlatformFacade,
    limit_in_seconds: f64,
    deterministic_limit: f64,
    user_time_mode: UserTimeMode,
}

impl TimeLimitBuilder {
    pub(crate) fn new() -> Self {
        Self {
            platform: PlatformFacade::real(),
            limit_in_seconds: f64::INFINITY,
            deterministic_limit: f64::INFINITY,
            user_time_mode: UserTimeMode::Disabled,
        }
    }

    /// Sets the elapsed time limit in seconds. Infinity means no limit.
    pub fn limit_in_seconds(mut self, limit_in_seconds: f64) -> Self {
        self.limit_in_seconds = limit_in_seconds;
        self
    }

    /// Sets the elapsed time limit.
    pub fn limit(self, limit: Duration) -> Self {
        self.limit_in_seconds(limit.as_secs_f64())
    }

    /// Sets the deterministic time limit. Infinity means no limit.
    pub fn deterministic_limit(mut self, deterministic_limit: f64) -> Self {
        self.deterministic_limit = deterministic_limit;
        self
    }

    /// Sets whether processor time confirms the wall clock. See [`UserTimeMode`].
    pub fn user_time_mode(mut self, user_time_mode: UserTimeMode) -> Self {
        self.user_time_mode = user_time_mode;
        self
    }

    #[cfg(test)]
    pub(crate) fn platform(mut self, platform: impl Into<PlatformFacade>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Creates the time limit. The elapsed time limit starts counting now.
    ///
    /// # Panics
    ///
    /// Panics if either limit is NaN.
    #[must_use]
    pub fn build(self) -> TimeLimit {
        TimeLimit::from_parts(
            self.platform,
            self.limit_in_seconds,
            self.deterministic_limit,
            self.user_time_mode,
        )
    }
}
