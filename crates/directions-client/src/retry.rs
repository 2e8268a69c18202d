//! Retry policies for the route request. The default is a single attempt.

use std::sync::Arc;
use std::time::Duration;

use backon::{BackoffBuilder, ExponentialBuilder};

use crate::config::DirectionsConfig;
use crate::error::RouteError;

/// Decides whether a failed attempt is tried again.
pub trait RetryPolicy: Send + Sync {
    /// Delay before retry number `attempt` (1-based) after `error`; None gives up.
    fn next_delay(&self, attempt: u32, error: &RouteError) -> Option<Duration>;
}

/// Single attempt: never retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn next_delay(&self, _attempt: u32, _error: &RouteError) -> Option<Duration> {
        None
    }
}

/// Bounded exponential backoff (doubling from `base_delay`, capped at `max_delay`, no jitter),
/// only for transient errors.
#[derive(Debug, Clone)]
pub struct BackoffRetry {
    schedule: ExponentialBuilder,
}

impl BackoffRetry {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        let schedule = ExponentialBuilder::default()
            .with_factor(2.0)
            .with_min_delay(base_delay)
            .with_max_delay(max_delay)
            .with_max_times(max_retries as usize);
        Self { schedule }
    }
}

impl RetryPolicy for BackoffRetry {
    fn next_delay(&self, attempt: u32, error: &RouteError) -> Option<Duration> {
        if attempt == 0 || !error.is_transient() {
            return None;
        }
        self.schedule.clone().build().nth(attempt as usize - 1)
    }
}

/// NoRetry when DIRECTIONS_MAX_RETRIES is 0, otherwise backoff from 500 ms capped at 5 s.
pub fn retry_policy_from_config(config: &DirectionsConfig) -> Arc<dyn RetryPolicy> {
    if config.max_retries == 0 {
        Arc::new(NoRetry)
    } else {
        Arc::new(BackoffRetry::new(
            config.max_retries,
            Duration::from_millis(500),
            Duration::from_secs(5),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable() -> RouteError {
        RouteError::UpstreamUnavailable("timeout".to_string())
    }

    #[test]
    fn test_no_retry_never_retries() {
        assert_eq!(NoRetry.next_delay(1, &unavailable()), None);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = BackoffRetry::new(4, Duration::from_millis(100), Duration::from_millis(300));
        assert_eq!(policy.next_delay(1, &unavailable()), Some(Duration::from_millis(100)));
        assert_eq!(policy.next_delay(2, &unavailable()), Some(Duration::from_millis(200)));
        assert_eq!(policy.next_delay(3, &unavailable()), Some(Duration::from_millis(300)));
        assert_eq!(policy.next_delay(5, &unavailable()), None);
    }

    #[test]
    fn test_backoff_skips_non_transient() {
        let policy = BackoffRetry::new(3, Duration::from_millis(10), Duration::from_secs(1));
        let quota = RouteError::QuotaExceeded {
            status: "OVER_QUERY_LIMIT".to_string(),
        };
        assert_eq!(policy.next_delay(1, &quota), None);
    }
}
