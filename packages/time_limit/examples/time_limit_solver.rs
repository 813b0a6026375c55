//! Runs a toy local search under both an elapsed time limit and a deterministic time limit.
//!
//! Set `TIME_LIMIT_USE_USERTIME=1` to confirm the wall clock against processor time.

use std::hint::black_box;

use time_limit::{TimeLimit, UserTimeMode};

/// Cost of evaluating one candidate, in deterministic time units.
const WORK_PER_CANDIDATE: f64 = 0.001;

fn main() {
    let mut time_limit = TimeLimit::builder()
        .limit_in_seconds(0.5)
        .deterministic_limit(25.0)
        .user_time_mode(UserTimeMode::from_env())
        .build();

    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let mut best = u64::MAX;
    let mut evaluated = 0_u64;

    while !time_limit.reached() {
        // xorshift
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;

        best = best.min(black_box(state) % 1_000_000);
        evaluated = evaluated.wrapping_add(1);

        time_limit.advance_deterministic_time(WORK_PER_CANDIDATE);
    }

    println!("Evaluated {evaluated} candidates, best cost {best}");
    println!(
        "Elapsed {:.3}s, deterministic {:.3}",
        time_limit.elapsed_time(),
        time_limit.elapsed_deterministic_time()
    );
    println!("Stopped with {time_limit}");
}
