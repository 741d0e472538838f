//! Coordinator configuration.

use inteca_cache::CachePolicy;
use std::time::Duration;

/// Configuration for the synchronization coordinator.
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    /// Freshness windows for cache entries.
    pub cache: CachePolicy,
    /// Commit retry behavior for mutations.
    pub retry: RetryPolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            cache: CachePolicy::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Retry budget for mutation commits.
///
/// Retrying is opt-in: the default budget is a single attempt, and only
/// transient failures are retried. Once the budget is exhausted the
/// mutation is terminal-failed and rolled back.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first (minimum 1).
    pub max_attempts: u32,
    /// Base delay for the exponential backoff.
    pub base_delay: Duration,
    /// Upper bound on a single backoff delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// The standard budget for editor surfaces: three attempts.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            max_attempts: 3,
            ..Self::default()
        }
    }

    /// Backoff delay before the attempt after `attempt` (1-based), with
    /// equal jitter so concurrent editors do not retry in lockstep.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        use rand::Rng;

        let base = self.base_delay.as_millis() as u64;
        let shift = (attempt.saturating_sub(1)).min(16);
        let exp = base
            .saturating_mul(1u64 << shift)
            .min(self.max_delay.as_millis() as u64)
            .max(1);
        let half = exp / 2;
        let jitter = rand::thread_rng().gen_range(0..=half.max(1));
        Duration::from_millis(half + jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}
