//! Heuristic configuration
//!
//! Every detector takes an explicit config struct; nothing reads ambient
//! global state. Threshold fields are `Option` so that "caller explicitly
//! chose a value" and "caller omitted the value" stay distinct. The built-in
//! fallback for each field is resolved through an accessor method and
//! documented on the field.

use serde::{Deserialize, Serialize};

/// Aggregate heuristics configuration, deserializable from the settings
/// file's `[heuristics]` table. Defaults to all built-in thresholds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    pub fees: FeeConfig,
    pub leaks: LeakConfig,
    pub subscriptions: SubscriptionConfig,
    pub rules: RuleConfig,
}

/// Fee detector configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Keyword vocabulary matched case-insensitively against transaction
    /// names. Empty falls back to the built-in multilingual list in
    /// `insights::fees::DEFAULT_FEE_KEYWORDS`.
    pub keywords: Vec<String>,
}

/// Leak detector configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeakConfig {
    /// Minimum occurrences per name group (fallback: 3)
    pub min_count: Option<usize>,
    /// Minimum cumulative absolute total (fallback: 15.0)
    pub min_total: Option<f64>,
    /// Maximum average per transaction (fallback: 10.0)
    pub max_avg: Option<f64>,
}

impl LeakConfig {
    pub fn min_count(&self) -> usize {
        self.min_count.unwrap_or(3)
    }

    pub fn min_total(&self) -> f64 {
        self.min_total.unwrap_or(15.0)
    }

    pub fn max_avg(&self) -> f64 {
        self.max_avg.unwrap_or(10.0)
    }
}

/// Subscription detector configuration.
///
/// The periodicity windows and stability ceilings are policy; the fallbacks
/// below are the values the detector shipped with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    /// Minimum occurrences per name group (fallback: 3)
    pub min_occurrences: Option<usize>,
    /// Monthly cadence window, mean gap in days (fallback: 20.0)
    pub monthly_min_days: Option<f64>,
    /// Monthly cadence window, mean gap in days (fallback: 40.0)
    pub monthly_max_days: Option<f64>,
    /// Weekly cadence window, mean gap in days (fallback: 6.0)
    pub weekly_min_days: Option<f64>,
    /// Weekly cadence window, mean gap in days (fallback: 9.0)
    pub weekly_max_days: Option<f64>,
    /// Maximum population stddev of the gap sequence in days (fallback: 3.0)
    pub max_gap_stddev: Option<f64>,
    /// Amount stability: stddev/mean ceiling (fallback: 0.10)
    pub max_amount_ratio: Option<f64>,
    /// Amount stability: absolute stddev ceiling in currency units, an
    /// alternative to the ratio for small amounts (fallback: 1.0)
    pub max_amount_stddev: Option<f64>,
}

impl SubscriptionConfig {
    pub fn min_occurrences(&self) -> usize {
        self.min_occurrences.unwrap_or(3)
    }

    pub fn monthly_min_days(&self) -> f64 {
        self.monthly_min_days.unwrap_or(20.0)
    }

    pub fn monthly_max_days(&self) -> f64 {
        self.monthly_max_days.unwrap_or(40.0)
    }

    pub fn weekly_min_days(&self) -> f64 {
        self.weekly_min_days.unwrap_or(6.0)
    }

    pub fn weekly_max_days(&self) -> f64 {
        self.weekly_max_days.unwrap_or(9.0)
    }

    pub fn max_gap_stddev(&self) -> f64 {
        self.max_gap_stddev.unwrap_or(3.0)
    }

    pub fn max_amount_ratio(&self) -> f64 {
        self.max_amount_ratio.unwrap_or(0.10)
    }

    pub fn max_amount_stddev(&self) -> f64 {
        self.max_amount_stddev.unwrap_or(1.0)
    }
}

/// Rule proposer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Minimum fraction of a group sharing the dominant category
    /// (fallback: 0.7)
    pub min_consistency: Option<f64>,
    /// Minimum occurrences per merchant group (fallback: 2)
    pub min_occurrences: Option<usize>,
}

impl RuleConfig {
    pub fn min_consistency(&self) -> f64 {
        self.min_consistency.unwrap_or(0.7)
    }

    pub fn min_occurrences(&self) -> usize {
        self.min_occurrences.unwrap_or(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let h = Heuristics::default();
        assert_eq!(h.leaks.min_count(), 3);
        assert_eq!(h.leaks.min_total(), 15.0);
        assert_eq!(h.leaks.max_avg(), 10.0);
        assert_eq!(h.subscriptions.min_occurrences(), 3);
        assert_eq!(h.subscriptions.max_gap_stddev(), 3.0);
        assert_eq!(h.rules.min_consistency(), 0.7);
        assert!(h.fees.keywords.is_empty());
    }

    #[test]
    fn test_explicit_zero_is_not_omitted() {
        // An explicit zero threshold must survive as zero rather than being
        // silently swapped for the fallback
        let leaks = LeakConfig {
            min_total: Some(0.0),
            ..Default::default()
        };
        assert_eq!(leaks.min_total(), 0.0);
        assert_eq!(leaks.max_avg(), 10.0);
    }

    #[test]
    fn test_deserialize_partial_table() {
        let h: Heuristics = toml::from_str(
            r#"
            [leaks]
            min_count = 5

            [subscriptions]
            monthly_max_days = 45.0
            "#,
        )
        .unwrap();
        assert_eq!(h.leaks.min_count(), 5);
        assert_eq!(h.leaks.min_total(), 15.0);
        assert_eq!(h.subscriptions.monthly_max_days(), 45.0);
        assert_eq!(h.subscriptions.monthly_min_days(), 20.0);
    }
}
