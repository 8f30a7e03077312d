//! # Status-Poll Backoff Schedule
//!
//! The wait before poll N+1 doubles from a 2-second base and caps at
//! 10 seconds. The first poll never waits.

use std::time::Duration;

/// Base wait before the second poll.
const BASE_MS: u64 = 2_000;
/// Ceiling on the wait between polls.
const CAP_MS: u64 = 10_000;

/// The wait before the next poll, given how many polls have completed
/// since the last one that ran without waiting.
///
/// `attempt` 0 is the gap between the first and second polls.
pub fn backoff_delay(attempt: u32) -> Duration {
    let factor = 1u64 << attempt.min(8);
    Duration::from_millis((BASE_MS.saturating_mul(factor)).min(CAP_MS))
}
