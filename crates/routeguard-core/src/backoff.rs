//! Backoff strategies for retry delays.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backoff strategy for retry delays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackoffStrategy {
    /// Fixed delay between retries
    Fixed,
    /// Linear increase: delay * attempt
    Linear,
    /// Exponential increase: delay * 2^attempt
    #[default]
    Exponential,
}

impl BackoffStrategy {
    /// Delay after the failed `attempt` (1-based), capped at `max_delay`.
    pub fn calculate_delay(
        &self,
        attempt: u32,
        base_delay: Duration,
        max_delay: Duration,
    ) -> Duration {
        let delay = match self {
            BackoffStrategy::Fixed => base_delay,
            BackoffStrategy::Linear => base_delay.saturating_mul(attempt),
            BackoffStrategy::Exponential => {
                let multiplier = 2u32.saturating_pow(attempt);
                base_delay.saturating_mul(multiplier)
            }
        };

        delay.min(max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_scale_the_base_delay() {
        let base = Duration::from_millis(100);
        let cap = Duration::from_secs(1);
        assert_eq!(BackoffStrategy::Fixed.calculate_delay(3, base, cap), base);
        assert_eq!(
            BackoffStrategy::Linear.calculate_delay(3, base, cap),
            Duration::from_millis(300)
        );
        assert_eq!(
            BackoffStrategy::Exponential.calculate_delay(3, base, cap),
            Duration::from_millis(800)
        );
        assert_eq!(BackoffStrategy::Exponential.calculate_delay(40, base, cap), cap);
    }
}
