//! Subscription detection
//!
//! Finds recurring charges: same name, roughly regular spacing, stable
//! amounts. The periodicity windows and stability ceilings live in
//! `SubscriptionConfig` with the shipped values as fallbacks.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mean_std;
use crate::amount::{round2, signed_amount};
use crate::config::SubscriptionConfig;
use crate::models::{Classification, Transaction};

/// A recurring charge detected from temporal regularity and amount
/// stability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCandidate {
    pub name: String,
    pub count: usize,
    pub avg_amount: f64,
    pub avg_period_days: f64,
    pub stddev_days: f64,
    pub last_date: NaiveDate,
    /// Up to 3 most-recent transaction IDs
    pub sample_tx_ids: Vec<String>,
    pub classification: Classification,
    pub confidence: f64,
}

/// Detect recurring transactions among expenses.
///
/// A name group qualifies when it has enough occurrences, its mean
/// inter-transaction gap falls in the monthly or weekly window with a small
/// gap stddev, and its amounts are stable (stddev/mean under the ratio
/// ceiling, or absolute stddev under the absolute ceiling). The gap
/// computation sorts each group by date first, so input order never matters.
/// Results are sorted by confidence descending, ties broken by average
/// amount descending.
pub fn detect_subscriptions(
    txs: &[Transaction],
    config: &SubscriptionConfig,
) -> Vec<SubscriptionCandidate> {
    let mut by_name: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in txs {
        if tx.classification != Classification::Expense {
            continue;
        }
        by_name.entry(tx.name.as_str()).or_default().push(tx);
    }

    let mut out = Vec::new();
    for (name, mut list) in by_name {
        if list.len() < config.min_occurrences() {
            continue;
        }
        list.sort_by_key(|tx| tx.date);

        let gaps: Vec<f64> = list
            .windows(2)
            .map(|w| (w[1].date - w[0].date).num_days() as f64)
            .collect();
        let (avg_gap, gap_std) = mean_std(&gaps);

        let monthly = avg_gap >= config.monthly_min_days() && avg_gap <= config.monthly_max_days();
        let weekly = avg_gap >= config.weekly_min_days() && avg_gap <= config.weekly_max_days();
        if !(monthly || weekly) {
            continue;
        }
        if gap_std > config.max_gap_stddev() {
            continue;
        }

        let mut amounts = Vec::with_capacity(list.len());
        let mut sample_tx_ids = Vec::with_capacity(3);
        for (i, tx) in list.iter().enumerate() {
            if let Ok(v) = signed_amount(tx) {
                amounts.push(v.abs());
            }
            if i + 3 >= list.len() {
                sample_tx_ids.push(tx.id.clone());
            }
        }
        let (avg_amount, amount_std) = mean_std(&amounts);
        let stable = (avg_amount > 0.0 && amount_std / avg_amount < config.max_amount_ratio())
            || amount_std < config.max_amount_stddev();
        if !stable {
            continue;
        }

        let mut confidence: f64 = 0.7;
        if monthly {
            confidence += 0.1;
        }
        if gap_std < 1.0 {
            confidence += 0.1;
        }
        if stable {
            confidence += 0.1;
        }
        let confidence = confidence.min(1.0);

        out.push(SubscriptionCandidate {
            name: name.to_string(),
            count: list.len(),
            avg_amount: round2(avg_amount),
            avg_period_days: round2(avg_gap),
            stddev_days: round2(gap_std),
            last_date: list.last().map(|tx| tx.date).unwrap_or_default(),
            sample_tx_ids,
            classification: Classification::Expense,
            confidence,
        });
    }

    out.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.avg_amount
                    .partial_cmp(&a.avg_amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    debug!(candidates = out.len(), "subscription detection complete");
    out
}
