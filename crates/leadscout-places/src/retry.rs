//! Exponential back-off for place-lookup requests.
//!
//! Only errors for which [`PlacesError::is_transient`] holds are retried.
//! Quota exhaustion is returned immediately so a dead key does not burn
//! through the remaining budget.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

const MAX_DELAY_MS: u64 = 30_000;

/// Nominal delay before retry number `retry` (1-based), before jitter:
/// `base × 2^(retry-1)`, capped at [`MAX_DELAY_MS`].
fn nominal_delay_ms(retry: u32, backoff_base_ms: u64) -> u64 {
    let exponent = retry.saturating_sub(1).min(10);
    backoff_base_ms
        .saturating_mul(1u64 << exponent)
        .min(MAX_DELAY_MS)
}

/// Applies ±25 % jitter so concurrent batch queries do not retry in lockstep.
fn jittered(delay_ms: u64) -> Duration {
    let factor = 0.75 + rand::random::<f64>() * 0.5;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let ms = (delay_ms as f64 * factor) as u64;
    Duration::from_millis(ms)
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, PlacesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    let mut retry = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retry >= max_retries || !err.is_transient() {
            return Err(err);
        }
        retry += 1;
        let delay = jittered(nominal_delay_ms(retry, backoff_base_ms));
        tracing::warn!(
            retry,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "transient places error, backing off"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn unknown_error() -> PlacesError {
        PlacesError::ApiStatus {
            status: "UNKNOWN_ERROR".to_owned(),
            message: String::new(),
        }
    }

    /// Fails with `error()` for the first `failures` calls, then returns the
    /// call number.
    async fn flaky(
        calls: &AtomicU32,
        max_retries: u32,
        failures: u32,
        error: fn() -> PlacesError,
    ) -> Result<u32, PlacesError> {
        retry_with_backoff(max_retries, 0, || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < failures {
                Err(error())
            } else {
                Ok(n)
            }
        })
        .await
    }

    #[test]
    fn nominal_delay_doubles_and_caps() {
        assert_eq!(nominal_delay_ms(1, 500), 500);
        assert_eq!(nominal_delay_ms(2, 500), 1_000);
        assert_eq!(nominal_delay_ms(3, 500), 2_000);
        assert_eq!(nominal_delay_ms(20, 500), MAX_DELAY_MS);
    }

    #[test]
    fn jitter_stays_within_a_quarter() {
        for _ in 0..100 {
            let ms = jittered(1_000).as_millis();
            assert!((750..=1_250).contains(&ms), "jittered delay {ms}ms");
        }
    }

    #[tokio::test]
    async fn first_success_is_not_retried() {
        let calls = AtomicU32::new(0);
        assert_eq!(flaky(&calls, 3, 0, unknown_error).await.unwrap(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_errors_are_retried_until_success() {
        let calls = AtomicU32::new(0);
        assert_eq!(flaky(&calls, 3, 2, unknown_error).await.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retries_stop_at_the_limit() {
        let calls = AtomicU32::new(0);
        let result = flaky(&calls, 2, u32::MAX, unknown_error).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(PlacesError::ApiStatus { .. })));
    }

    #[tokio::test]
    async fn quota_exhaustion_is_returned_at_once() {
        let calls = AtomicU32::new(0);
        let result = flaky(&calls, 3, u32::MAX, || {
            PlacesError::QuotaExceeded("daily limit".to_owned())
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(PlacesError::QuotaExceeded(_))));
    }
}
