#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Deadlines for tight computational loops, such as iterative solvers and search algorithms.
//!
//! A [`TimeLimit`] answers one question as cheaply as possible: has the budget run out, so
//! the computation must stop now? It tracks two independent budgets:
//!
//! * **Elapsed time**, which advances on its own. The check is predictive: it remembers the
//!   longest recent interval between two polls and reports the limit as reached if the next
//!   poll would likely come too late. This keeps a long, irregular loop iteration from
//!   overshooting the deadline by a whole iteration.
//! * **Deterministic time**, which only advances when the caller reports work done. Two runs
//!   that report the same work stop at the same point, no matter how fast the machine is.
//!
//! Once a time limit has been reached, it stays reached.
//!
//! # Example
//!
//! ```
//! use time_limit::TimeLimit;
//!
//! let mut time_limit = TimeLimit::with_deterministic_limit(60.0, 100.0);
//! let mut best = u64::MAX;
//! let mut candidate = 1_u64;
//!
//! while !time_limit.reached() {
//!     candidate = candidate.wrapping_mul(6364136223846793005).wrapping_add(1);
//!     best = best.min(candidate % 1000);
//!
//!     // Reproducible runs depend on reporting the same work for the same iterations.
//!     time_limit.advance_deterministic_time(1.0);
//! }
//!
//! assert_eq!(time_limit.elapsed_deterministic_time(), 100.0);
//! println!("best: {best}, stopped with {time_limit}");
//! ```
//!
//! # User time
//!
//! For benchmarks on busy machines, [`UserTimeMode`] makes the time limit double-check the
//! wall clock against processor time actually consumed, so a process that was descheduled
//! does not lose its budget. This is a per-process decision, typically taken once at startup
//! with [`UserTimeMode::from_env()`].
//!
//! # Threading
//!
//! A time limit is polled from one thread through `&mut self`. Computations spread over
//! several threads need one time limit per thread or their own synchronization.

mod builder;
mod pal;
mod running_max;
mod time_limit;
mod user_time;

pub use builder::*;
pub use running_max::*;
pub use time_limit::*;
pub(crate) use user_time::UserTimer;
pub use user_time::{USER_TIME_ENV_VAR, UserTimeMode};
