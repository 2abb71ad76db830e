//! Retry policy for transient transport failures.

use std::time::Duration;

use crate::error::FetchError;

/// Hard cap on retries, to avoid amplifying load against a failing endpoint.
pub const MAX_RETRIES: i32 = 2;

/// Clamps a requested retry budget to the supported range.
pub fn clamp_retries(requested: i32) -> i32 {
    requested.clamp(0, MAX_RETRIES)
}

/// The wait before the next attempt, keyed to the *remaining* budget.
///
/// The schedule grows as the last chances are used up: with two retries left
/// the wait is short, before the final retry it is the longest. This mirrors
/// the behaviour the retry cap was originally tuned against.
pub fn backoff_delay(remaining: i32) -> Duration {
    if remaining >= MAX_RETRIES {
        Duration::from_millis(1000)
    } else {
        Duration::from_millis(3000)
    }
}

/// Whether a failure is a transient transport failure worth retrying.
///
/// Typed [`FetchError`]s (non-OK status, malformed XML, configuration and
/// transform failures) are final. Everything else is a transport-level
/// failure from the underlying stack, such as a refused connection or a
/// reset, and is retried while budget remains.
pub fn is_transient(error: &anyhow::Error) -> bool {
    error.downcast_ref::<FetchError>().is_none()
}
