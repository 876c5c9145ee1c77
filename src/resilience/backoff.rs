//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// Calculate the delay before retry number `attempt` (0-indexed).
///
/// `base * 2^attempt`, capped at `max`, plus a random jitter of up to 10%
/// of the capped value so concurrent callers do not retry in lockstep.
pub fn backoff_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    backoff_delay_with(attempt, base, max, &mut rand::thread_rng())
}

/// Same as [`backoff_delay`] but with a caller-supplied RNG, so tests can
/// seed it and assert exact bounds.
pub fn backoff_delay_with<R: Rng>(attempt: u32, base: Duration, max: Duration, rng: &mut R) -> Duration {
    let raw = base.as_secs_f64() * 2f64.powi(attempt.min(1023) as i32);
    let capped = raw.min(max.as_secs_f64());

    let jitter = if capped > 0.0 {
        rng.gen_range(0.0..capped * 0.1)
    } else {
        0.0
    };

    Duration::from_secs_f64(capped + jitter)
}
