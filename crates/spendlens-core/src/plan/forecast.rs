//! Spend forecasting
//!
//! Projects spending over a future horizon by combining detected
//! subscriptions (deterministic recurring contributions) with the average
//! daily non-recurring spend, optionally broken down day by day.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::amount::{round2, signed_amount};
use crate::config::SubscriptionConfig;
use crate::insights::subscriptions::detect_subscriptions;
use crate::models::{Classification, Transaction};

/// Horizon-level forecast totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub days: u32,
    /// Expected subscription spend within the horizon
    pub recurring_expenses: f64,
    /// Average daily non-recurring spend, from days that had any
    pub avg_daily_spend: f64,
    pub projected_spend: f64,
    pub currency: Option<String>,
    pub assumptions: Vec<String>,
}

/// One forecast day in the daily breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub expected_spend: f64,
    /// Running sum across the horizon; non-decreasing by construction
    pub cumulative_spend: f64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub recurring_items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    pub summary: ForecastSummary,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub daily: Vec<DailyForecast>,
}

/// Project spending for the next `days` days (0 falls back to 30).
///
/// Subscriptions detected in the input contribute `avg_amount x
/// (horizon / avg_period)`. Remaining expenses feed a daily average over the
/// distinct days that saw any non-recurring spend (denominator floored at 1).
/// With `include_daily`, each subscription is stepped forward from its last
/// observed date by its rounded period to place expected hits inside the
/// horizon.
pub fn compute_forecast(
    txs: &[Transaction],
    days: u32,
    include_daily: bool,
    config: &SubscriptionConfig,
    today: NaiveDate,
) -> ForecastResult {
    let days = if days == 0 { 30 } else { days };
    let horizon_end = today + Duration::days(i64::from(days));

    let subscriptions = detect_subscriptions(txs, config);
    let subscription_names: BTreeSet<&str> =
        subscriptions.iter().map(|s| s.name.as_str()).collect();
    let subscription_amounts: BTreeMap<&str, f64> = subscriptions
        .iter()
        .map(|s| (s.name.as_str(), s.avg_amount))
        .collect();

    let mut non_recurring_total = 0.0;
    let mut expense_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut currency = None;
    for tx in txs {
        if tx.classification != Classification::Expense {
            continue;
        }
        if subscription_names.contains(tx.name.as_str()) {
            continue;
        }
        let Ok(amount) = signed_amount(tx) else {
            continue;
        };
        non_recurring_total += amount.abs();
        expense_dates.insert(tx.date);
        if currency.is_none() {
            currency = Some(tx.currency.clone());
        }
    }
    let expense_days = expense_dates.len().max(1);
    let avg_daily_non_recurring = non_recurring_total / expense_days as f64;

    let mut recurring_total = 0.0;
    let mut recurring_by_day: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for sub in &subscriptions {
        let period_days = if sub.avg_period_days > 0.0 {
            sub.avg_period_days
        } else {
            30.0
        };

        let occurrences = f64::from(days) / period_days;
        recurring_total += sub.avg_amount * occurrences;

        if include_daily {
            let step = Duration::days((period_days.round() as i64).max(1));
            let mut next_hit = sub.last_date;
            while next_hit < today {
                next_hit += step;
            }
            while next_hit < horizon_end {
                recurring_by_day
                    .entry(next_hit)
                    .or_default()
                    .push(sub.name.clone());
                next_hit += step;
            }
        }
    }

    let projected_spend = recurring_total + avg_daily_non_recurring * f64::from(days);

    let mut daily = Vec::new();
    if include_daily {
        let mut cumulative = 0.0;
        for offset in 0..days {
            let day = today + Duration::days(i64::from(offset));
            let mut expected = avg_daily_non_recurring;
            let recurring_items = recurring_by_day.remove(&day).unwrap_or_default();
            for name in &recurring_items {
                expected += subscription_amounts.get(name.as_str()).copied().unwrap_or(0.0);
            }
            cumulative += expected;
            daily.push(DailyForecast {
                date: day,
                expected_spend: round2(expected),
                cumulative_spend: round2(cumulative),
                recurring_items,
            });
        }
    }

    ForecastResult {
        summary: ForecastSummary {
            days,
            recurring_expenses: round2(recurring_total),
            avg_daily_spend: round2(avg_daily_non_recurring),
            projected_spend: round2(projected_spend),
            currency,
            assumptions: vec![
                "recurring detected via subscription heuristics".to_string(),
                "non-recurring extrapolated from historical average".to_string(),
            ],
        },
        daily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, name: &str, amount: &str, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            name: name.to_string(),
            classification: Classification::Expense,
            amount_text: amount.to_string(),
            currency: "EUR".to_string(),
            date: date.parse().unwrap(),
            account_name: "Checking".to_string(),
            category_name: None,
            category_id: None,
            merchant_name: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn netflix_plus_coffee() -> Vec<Transaction> {
        vec![
            tx("1", "Netflix", "€10.00", "2026-01-01"),
            tx("2", "Netflix", "€10.00", "2026-01-31"),
            tx("3", "Netflix", "€10.00", "2026-03-02"),
            tx("4", "Coffee", "€4.00", "2026-03-01"),
            tx("5", "Coffee", "€4.00", "2026-03-03"),
        ]
    }

    #[test]
    fn test_forecast_summary_combines_recurring_and_daily_average() {
        let out = compute_forecast(
            &netflix_plus_coffee(),
            30,
            false,
            &SubscriptionConfig::default(),
            date("2026-03-05"),
        );
        // Netflix: 30-day period, one expected hit at €10
        assert_eq!(out.summary.recurring_expenses, 10.00);
        // Coffee on 2 distinct days, €8 total -> €4/day
        assert_eq!(out.summary.avg_daily_spend, 4.00);
        // 10 + 4 * 30
        assert_eq!(out.summary.projected_spend, 130.00);
        assert!(out.daily.is_empty());
    }

    #[test]
    fn test_forecast_zero_days_defaults_to_thirty() {
        let out = compute_forecast(
            &netflix_plus_coffee(),
            0,
            false,
            &SubscriptionConfig::default(),
            date("2026-03-05"),
        );
        assert_eq!(out.summary.days, 30);
    }

    #[test]
    fn test_forecast_daily_breakdown_places_subscription_hits() {
        let out = compute_forecast(
            &netflix_plus_coffee(),
            30,
            true,
            &SubscriptionConfig::default(),
            date("2026-03-05"),
        );
        assert_eq!(out.daily.len(), 30);

        // Netflix last seen 2026-03-02, 30-day step -> first hit 2026-04-01
        let hit_days: Vec<&DailyForecast> = out
            .daily
            .iter()
            .filter(|d| !d.recurring_items.is_empty())
            .collect();
        assert_eq!(hit_days.len(), 1);
        assert_eq!(hit_days[0].date, date("2026-04-01"));
        assert_eq!(hit_days[0].recurring_items, vec!["Netflix"]);
        assert_eq!(hit_days[0].expected_spend, 14.00);
    }

    #[test]
    fn test_forecast_cumulative_is_non_decreasing() {
        let out = compute_forecast(
            &netflix_plus_coffee(),
            45,
            true,
            &SubscriptionConfig::default(),
            date("2026-03-05"),
        );
        let mut prev = 0.0;
        for day in &out.daily {
            assert!(day.cumulative_spend >= prev);
            prev = day.cumulative_spend;
        }
        assert_eq!(out.daily.len(), 45);
    }

    #[test]
    fn test_forecast_without_subscriptions_is_pure_daily_average() {
        let txs = vec![
            tx("1", "Lunch", "€12.00", "2026-03-01"),
            tx("2", "Lunch", "€12.00", "2026-03-02"),
        ];
        let out = compute_forecast(
            &txs,
            10,
            false,
            &SubscriptionConfig::default(),
            date("2026-03-05"),
        );
        assert_eq!(out.summary.recurring_expenses, 0.0);
        assert_eq!(out.summary.avg_daily_spend, 12.00);
        assert_eq!(out.summary.projected_spend, 120.00);
    }

    #[test]
    fn test_forecast_empty_input() {
        let out = compute_forecast(
            &[],
            30,
            true,
            &SubscriptionConfig::default(),
            date("2026-03-05"),
        );
        assert_eq!(out.summary.projected_spend, 0.0);
        assert_eq!(out.daily.len(), 30);
        assert!(out.daily.iter().all(|d| d.expected_spend == 0.0));
    }
}
