use std::fmt;
use std::num::NonZero;

use new_zealand::nz;
use tracing::{debug, trace};

use crate::pal::{Platform, PlatformFacade};
use crate::{RunningMax, TimeLimitBuilder, UserTimeMode, UserTimer};

/// Added to every prediction so that the limit errs on the side of being reached early.
const SAFETY_BUFFER_SECONDS: f64 = 1e-4;
const SAFETY_BUFFER_NANOS: u64 = 100_000;

/// How many recent poll intervals feed the prediction of the next one.
const HISTORY_SIZE: NonZero<usize> = nz!(100);

const NANOS_PER_SECOND: f64 = 1e9;

/// Enforces an elapsed time limit and a deterministic time limit from a single thread.
///
/// Call [`reached()`][Self::reached] as often as possible from the loop being limited and stop
/// as soon as it returns `true`. Once it has returned `true`, it always returns `true`.
///
/// # Elapsed time
///
/// The elapsed time limit is conservative: it is considered reached when
/// `now + max(T, ε) >= limit`, where ε is a small safety buffer and T is the largest interval
/// between two consecutive polls among the last 100 polls. In other words, the limit is
/// reached if the next poll is likely to come too late. A single slow iteration early on does
/// not make the limit trigger early forever, as it falls out of the window after 100 polls.
///
/// A poll costs one clock reading plus a handful of instructions.
///
/// # Deterministic time
///
/// Deterministic time never advances on its own. The caller reports work done via
/// [`advance_deterministic_time()`][Self::advance_deterministic_time], so that two runs that
/// report the same work stop at exactly the same point regardless of machine speed.
///
/// # Examples
///
/// ```
/// use time_limit::TimeLimit;
///
/// let mut time_limit = TimeLimit::with_deterministic_limit(f64::INFINITY, 10.0);
/// let mut iterations = 0;
///
/// while !time_limit.reached() {
///     // Each iteration is worth 0.5 units of deterministic time.
///     iterations += 1;
///     time_limit.advance_deterministic_time(0.5);
/// }
///
/// assert_eq!(iterations, 20);
/// assert_eq!(time_limit.deterministic_time_left(), 0.0);
/// ```
///
/// # Thread safety
///
/// The type can be moved between threads but is polled through `&mut self`. A computation
/// spread over several threads needs one instance per thread or external synchronization.
pub struct TimeLimit {
    platform: PlatformFacade,

    start_nanos: u64,
    last_nanos: u64,
    limit: RealTimeLimit,
    running_max: RunningMax<u64>,

    // Only present in user time mode.
    user_time: Option<UserTimeLimit>,

    deterministic_limit: f64,
    elapsed_deterministic_time: f64,
}

/// The elapsed time axis is a one-way latch layered over a possibly refined deadline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RealTimeLimit {
    /// No elapsed time limit at all.
    Unbounded,

    /// Open, to be reached at this clock reading. May be moved by user time verification.
    At(u64),

    /// Latched. Never leaves this state.
    Reached,
}

#[derive(Debug)]
struct UserTimeLimit {
    timer: UserTimer,
    limit_in_seconds: f64,
}

impl UserTimeLimit {
    /// May be negative if the limit has been overrun.
    fn time_left_seconds(&self) -> f64 {
        self.limit_in_seconds - self.timer.elapsed_seconds()
    }
}

impl TimeLimit {
    /// Creates a time limit that is reached `limit_in_seconds` from now.
    ///
    /// An infinite limit is never reached. A zero or negative limit is reached on the first
    /// poll. The deterministic limit is infinite and user time mode is disabled; use
    /// [`builder()`][Self::builder] for anything else.
    ///
    /// # Panics
    ///
    /// Panics if `limit_in_seconds` is NaN.
    #[must_use]
    pub fn new(limit_in_seconds: f64) -> Self {
        Self::builder().limit_in_seconds(limit_in_seconds).build()
    }

    /// Creates a time limit with both an elapsed time limit and a deterministic time limit.
    ///
    /// Pass `f64::INFINITY` for either to ignore it.
    ///
    /// # Panics
    ///
    /// Panics if either limit is NaN.
    #[must_use]
    pub fn with_deterministic_limit(limit_in_seconds: f64, deterministic_limit: f64) -> Self {
        Self::builder()
            .limit_in_seconds(limit_in_seconds)
            .deterministic_limit(deterministic_limit)
            .build()
    }

    /// Creates a time limit that is never reached.
    ///
    /// Useful where an API requires a time limit but the caller has no budget to enforce.
    #[must_use]
    pub fn infinite() -> Self {
        Self::builder().build()
    }

    /// Starts building a time limit with custom settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use time_limit::{TimeLimit, UserTimeMode};
    ///
    /// let time_limit = TimeLimit::builder()
    ///     .limit(Duration::from_secs(30))
    ///     .deterministic_limit(1000.0)
    ///     .user_time_mode(UserTimeMode::from_env())
    ///     .build();
    ///
    /// assert!(time_limit.time_left() <= 30.0);
    /// ```
    pub fn builder() -> TimeLimitBuilder {
        TimeLimitBuilder::new()
    }

    pub(crate) fn from_parts(
        platform: PlatformFacade,
        limit_in_seconds: f64,
        deterministic_limit: f64,
        user_time_mode: UserTimeMode,
    ) -> Self {
        assert!(!limit_in_seconds.is_nan(), "time limit must not be NaN");
        assert!(
            !deterministic_limit.is_nan(),
            "deterministic time limit must not be NaN"
        );

        let start_nanos = platform.monotonic_nanos();

        let user_time = user_time_mode.is_enabled().then(|| UserTimeLimit {
            timer: UserTimer::start(platform.clone(), user_time_mode),
            limit_in_seconds,
        });

        trace!(
            limit_in_seconds,
            deterministic_limit,
            ?user_time_mode,
            "time limit started"
        );

        Self {
            platform,
            start_nanos,
            last_nanos: start_nanos,
            limit: limit_from_budget(start_nanos, limit_in_seconds),
            running_max: RunningMax::new(HISTORY_SIZE),
            user_time,
            deterministic_limit,
            elapsed_deterministic_time: 0.0,
        }
    }

    /// Returns `true` if the deterministic limit has been used up or if the next call to this
    /// function is likely to come after the elapsed time limit.
    ///
    /// Once this has returned `true`, it returns `true` on every later call.
    pub fn reached(&mut self) -> bool {
        if self.deterministic_time_left() <= 0.0 {
            return true;
        }

        let limit_nanos = match self.limit {
            RealTimeLimit::At(limit_nanos) => limit_nanos,
            RealTimeLimit::Unbounded => return false,
            RealTimeLimit::Reached => return true,
        };

        let current_nanos = self.platform.monotonic_nanos();
        self.running_max.push(
            current_nanos
                .saturating_sub(self.last_nanos)
                .max(SAFETY_BUFFER_NANOS),
        );
        self.last_nanos = current_nanos;

        let predicted_gap_nanos = self
            .running_max
            .current_max()
            .expect("we just pushed a value, so there is a maximum");

        if current_nanos.saturating_add(predicted_gap_nanos) < limit_nanos {
            return false;
        }

        if let Some(user_time) = &self.user_time {
            // Processor time is only read once the wall clock predicts the limit. It never runs
            // ahead of the wall clock, so budget left here means the wall clock overestimated.
            let time_left_seconds = user_time.time_left_seconds();

            if time_left_seconds > SAFETY_BUFFER_SECONDS {
                self.limit =
                    RealTimeLimit::At(self.last_nanos.saturating_add(seconds_to_nanos(
                        time_left_seconds,
                    )));

                debug!(
                    time_left_seconds,
                    "user time has budget left, elapsed time limit moved"
                );

                return false;
            }
        }

        self.limit = RealTimeLimit::Reached;

        debug!(
            elapsed_seconds = nanos_to_seconds(current_nanos.saturating_sub(self.start_nanos)),
            predicted_gap_seconds = nanos_to_seconds(predicted_gap_nanos),
            "time limit reached"
        );

        true
    }

    /// Returns the elapsed time left before the limit, in seconds.
    ///
    /// Never negative. Returns infinity if there is no elapsed time limit and exactly zero once
    /// [`reached()`][Self::reached] has returned `true` because of elapsed time. It may return
    /// a positive value at a point where `reached()` would return `true`, as the latter is
    /// conservative. In user time mode, the time left is measured in processor time.
    ///
    /// This reads the clock and is not meant for calling as often as `reached()`.
    #[must_use]
    pub fn time_left(&self) -> f64 {
        let limit_nanos = match self.limit {
            RealTimeLimit::At(limit_nanos) => limit_nanos,
            RealTimeLimit::Unbounded => return f64::INFINITY,
            RealTimeLimit::Reached => return 0.0,
        };

        let Some(delta_nanos) = limit_nanos.checked_sub(self.platform.monotonic_nanos()) else {
            return 0.0;
        };

        match &self.user_time {
            Some(user_time) => user_time.time_left_seconds().max(0.0),
            None => nanos_to_seconds(delta_nanos),
        }
    }

    /// Returns the deterministic time left before [`reached()`][Self::reached] returns `true`.
    ///
    /// Never negative. Returns infinity if the deterministic limit is infinite.
    #[must_use]
    pub fn deterministic_time_left(&self) -> f64 {
        (self.deterministic_limit - self.elapsed_deterministic_time).max(0.0)
    }

    /// Advances the deterministic time by `deterministic_duration`.
    ///
    /// Deterministic time never advances on its own, which is what makes it reproducible.
    ///
    /// # Panics
    ///
    /// Panics if `deterministic_duration` is negative or NaN. Time cannot go backwards.
    pub fn advance_deterministic_time(&mut self, deterministic_duration: f64) {
        assert!(
            deterministic_duration >= 0.0,
            "deterministic time can only advance, got {deterministic_duration}"
        );

        self.elapsed_deterministic_time += deterministic_duration;
    }

    /// Returns the seconds elapsed since this time limit was created.
    #[must_use]
    pub fn elapsed_time(&self) -> f64 {
        nanos_to_seconds(
            self.platform
                .monotonic_nanos()
                .saturating_sub(self.start_nanos),
        )
    }

    /// Returns the sum of all durations passed to
    /// [`advance_deterministic_time()`][Self::advance_deterministic_time] so far.
    #[must_use]
    pub fn elapsed_deterministic_time(&self) -> f64 {
        self.elapsed_deterministic_time
    }

    /// The deterministic limit this time limit was created with.
    #[must_use]
    pub fn deterministic_limit(&self) -> f64 {
        self.deterministic_limit
    }

    /// Whether processor time confirms the wall clock for this time limit.
    #[must_use]
    pub fn user_time_mode(&self) -> UserTimeMode {
        self.user_time
            .as_ref()
            .map_or(UserTimeMode::Disabled, |user_time| user_time.timer.mode())
    }
}

impl fmt::Debug for TimeLimit {
    #[cfg_attr(test, mutants::skip)] // Debug output is not part of the contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeLimit")
            .field("limit", &self.limit)
            .field("user_time", &self.user_time)
            .field("deterministic_limit", &self.deterministic_limit)
            .field(
                "elapsed_deterministic_time",
                &self.elapsed_deterministic_time,
            )
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "time left: {:.3}, deterministic time left: {:.3}",
            self.time_left(),
            self.deterministic_time_left()
        )
    }
}

fn limit_from_budget(start_nanos: u64, limit_in_seconds: f64) -> RealTimeLimit {
    #[expect(
        clippy::cast_precision_loss,
        reason = "only compared against, a rounding error near the end of time is irrelevant"
    )]
    let headroom_seconds = u64::MAX.saturating_sub(start_nanos) as f64 / NANOS_PER_SECOND;

    if limit_in_seconds >= headroom_seconds {
        return RealTimeLimit::Unbounded;
    }

    // Negative budgets become zero, so the limit is reached on the first poll.
    RealTimeLimit::At(start_nanos.saturating_add(seconds_to_nanos(limit_in_seconds)))
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "float to int casts saturate, which is exactly what we want here"
)]
fn seconds_to_nanos(seconds: f64) -> u64 {
    (seconds * NANOS_PER_SECOND) as u64
}

#[expect(
    clippy::cast_precision_loss,
    reason = "sub-nanosecond precision loss only kicks in after 100+ days"
)]
fn nanos_to_seconds(nanos: u64) -> f64 {
    nanos as f64 / NANOS_PER_SECOND
}
