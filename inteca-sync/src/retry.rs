//! Commit retry with exponential backoff.

use crate::config::RetryPolicy;
use inteca_remote::StoreResult;
use std::future::Future;
use tracing::warn;

/// Runs a commit attempt up to the policy's budget, backing off between
/// transient failures. Non-retryable failures (validation, rejection) are
/// returned immediately.
pub(crate) async fn commit_with_retry<F, Fut>(policy: &RetryPolicy, mut attempt_op: F) -> StoreResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = StoreResult<()>>,
{
    let budget = policy.max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match attempt_op().await {
            Ok(()) => return Ok(()),
            Err(err) if err.is_retryable() && attempt < budget => {
                let delay = policy.delay_for(attempt);
                warn!(attempt, ?delay, error = %err, "commit failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
