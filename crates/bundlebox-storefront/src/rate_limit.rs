//! Retry with exponential backoff for Storefront API calls.
//!
//! Only throttling (HTTP 429) and network failures are retried. GraphQL
//! errors, cart user errors and missing products come back the same way
//! every time and are returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::StorefrontError;

fn is_retriable(err: &StorefrontError) -> bool {
    matches!(
        err,
        StorefrontError::RateLimited { .. } | StorefrontError::Http(_)
    )
}

/// Runs `operation`, retrying retriable failures up to `max_retries` times.
///
/// The sleep before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds. `Retry-After` is reported in the error but not honoured here.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, StorefrontError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StorefrontError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient storefront error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
