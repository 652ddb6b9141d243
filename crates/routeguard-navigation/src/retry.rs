//! Retry policy for failed navigations.
//!
//! Attempts are numbered from 1. After attempt `k` fails, and `k` is below the attempt
//! budget, the dispatcher waits `delay_after(k)` before trying again. With the default
//! exponential strategy and a one-second base this is 2s, 4s, 8s, ...

pub use routeguard_core::BackoffStrategy;

use routeguard_core::NavigationConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRetryPolicy {
    /// Total attempts before falling back (at least 1)
    pub max_attempts: u32,
    /// Backoff unit
    pub base_delay: Duration,
    /// Maximum delay between attempts
    pub max_delay: Duration,
    /// Backoff strategy to use
    pub strategy: BackoffStrategy,
}

impl NavigationRetryPolicy {
    /// Exponential backoff, three attempts, one-second unit.
    pub fn exponential() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            strategy: BackoffStrategy::Exponential,
        }
    }

    /// Fixed delay between attempts.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            max_attempts: 3,
            base_delay: delay,
            max_delay: delay,
            strategy: BackoffStrategy::Fixed,
        }
    }

    /// Policy described by the `[navigation]` config section.
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            strategy: config.backoff,
        }
    }

    /// Set the attempt budget (clamped to at least 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the backoff strategy.
    pub fn with_strategy(mut self, strategy: BackoffStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the backoff unit.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the delay cap.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Delay after the failed `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.strategy
            .calculate_delay(attempt, self.base_delay, self.max_delay)
    }

    /// Returns `true` if another attempt follows the failed `attempt`.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for NavigationRetryPolicy {
    fn default() -> Self {
        Self::exponential()
    }
}
