use crate::models::error::FeedError;
use crate::services::runtime::Runtime;
use std::future::Future;

/// Retries an async operation with exponential backoff for rate-limited requests.
///
/// # Arguments
///
/// * `runtime` - Supplies the timer used between attempts
/// * `operation` - A closure that returns a Future resolving to `Result<T, FeedError>`
/// * `max_attempts` - Maximum number of attempts; 1 disables retrying
///
/// # Behavior
///
/// - Initial delay: 100ms
/// - Backoff multiplier: 5x (100ms → 500ms → 2500ms → ...), saturating at `u32::MAX`
/// - Only retries on `FeedError::RateLimited`
/// - All other errors immediately propagate
pub async fn retry_with_backoff<R, F, Fut, T>(
    runtime: &R,
    mut operation: F,
    max_attempts: u32,
) -> Result<T, FeedError>
where
    R: Runtime,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let mut delay_ms = 100;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(FeedError::RateLimited) if attempt < max_attempts => {
                console_warn!(
                    "Rate limited, retrying in {}ms (attempt {}/{})",
                    delay_ms,
                    attempt,
                    max_attempts
                );
                runtime.sleep(delay_ms).await;
                delay_ms = delay_ms.saturating_mul(5);
            }
            Err(e) => return Err(e),
        }
    }

    Err(FeedError::RateLimited)
}
