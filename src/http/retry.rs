//! Retry policies for read calls.
//!
//! The default everywhere is [`RetryPolicy::None`]: the exchange's trading
//! calls are not safe to re-issue blindly (duplicate-order risk), and even
//! read retries are the caller's decision. Opting in via the client builder
//! affects idempotent public reads only; trading calls never retry.

use std::time::Duration;

/// Retry policy for a request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// No retries. The default for every call.
    #[default]
    None,
    /// Stock backoff on transport failures + 502/503/504, with 429 included.
    /// Only ever applied to idempotent public reads.
    Idempotent,
    /// Caller-provided retry configuration.
    Custom(RetryConfig),
}

impl RetryPolicy {
    pub(crate) fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add jitter to the delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl RetryConfig {
    /// The stock config for idempotent reads.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_none() {
        assert!(matches!(RetryPolicy::default(), RetryPolicy::None));
        assert!(RetryPolicy::None.config().is_none());
    }

    #[test]
    fn test_idempotent_config_includes_rate_limit_status() {
        let config = RetryConfig::idempotent();
        assert!(config.retryable_statuses.contains(&429));
        assert!(config.retryable_statuses.contains(&503));
    }

    #[test]
    fn test_delay_doubles_without_jitter() {
        let config = RetryConfig {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: false,
            retryable_statuses: vec![],
        };
        assert_eq!(config.delay_for_attempt(0).as_millis(), 100);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 200);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 400);
    }

    #[test]
    fn test_delay_caps_at_max() {
        let config = RetryConfig {
            max_retries: 5,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(2000),
            backoff_factor: 10.0,
            jitter: false,
            retryable_statuses: vec![],
        };
        assert_eq!(config.delay_for_attempt(3).as_millis(), 2000);
    }
}
