//! Service configuration for the token feed
//!
//! Defaults match the reference deployment: 50 tokens per section,
//! a 3-second mutation tick touching 3–5 records, and fixed preset
//! thresholds.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use types::errors::FeedError;

/// Inclusive numeric range used for synthetic value generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Configuration for the token feed core.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Number of tokens generated per section at startup.
    pub tokens_per_section: usize,
    /// Mutation scheduler tick period.
    pub update_interval: Duration,
    /// How many records are mutated per tick, drawn uniformly.
    pub updates_per_tick: RangeInclusive<usize>,
    /// Bounded per-subscriber outbound queue capacity.
    pub subscriber_queue_capacity: usize,

    // Synthetic generation ranges
    pub market_cap_range: ValueRange,
    pub volume_range: ValueRange,
    pub transaction_range: RangeInclusive<u64>,
    pub price_range: ValueRange,
    /// Percentage price change assigned at generation; mutations use
    /// one tenth of this range.
    pub price_change_range: ValueRange,
    /// Seconds since launch assigned at generation.
    pub launch_age_range: RangeInclusive<i64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tokens_per_section: 50,
            update_interval: Duration::from_millis(3000),
            updates_per_tick: 3..=5,
            subscriber_queue_capacity: 64,
            market_cap_range: ValueRange::new(10_000.0, 10_000_000.0),
            volume_range: ValueRange::new(1_000.0, 1_000_000.0),
            transaction_range: 50..=10_000,
            price_range: ValueRange::new(0.00001, 100.0),
            price_change_range: ValueRange::new(-5.0, 5.0),
            launch_age_range: 60..=86_400,
        }
    }
}

impl FeedConfig {
    /// Reject programmer-error-class configurations outright.
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.tokens_per_section == 0 {
            return Err(FeedError::InvalidConfig {
                message: "tokens_per_section must be non-zero".to_string(),
            });
        }
        if self.update_interval.is_zero() {
            return Err(FeedError::InvalidConfig {
                message: "update_interval must be non-zero".to_string(),
            });
        }
        if self.updates_per_tick.is_empty() {
            return Err(FeedError::InvalidConfig {
                message: "updates_per_tick range must be non-empty".to_string(),
            });
        }
        if self.subscriber_queue_capacity == 0 {
            return Err(FeedError::InvalidConfig {
                message: "subscriber_queue_capacity must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FeedConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_values_match_reference() {
        let config = FeedConfig::default();
        assert_eq!(config.tokens_per_section, 50);
        assert_eq!(config.update_interval, Duration::from_millis(3000));
        assert_eq!(config.updates_per_tick, 3..=5);
    }

    #[test]
    fn test_zero_tokens_per_section_rejected() {
        let config = FeedConfig {
            tokens_per_section: 0,
            ..FeedConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FeedError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = FeedConfig {
            update_interval: Duration::ZERO,
            ..FeedConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_update_range_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let config = FeedConfig {
            updates_per_tick: 5..=3,
            ..FeedConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
