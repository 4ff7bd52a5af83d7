//! Spending-leak detection
//!
//! Finds "money leakage" patterns: small recurring-ish expenses that add up
//! without necessarily being perfectly periodic subscriptions. No keyword
//! filter; every expense group is a candidate until the thresholds say
//! otherwise.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amount::{round2, signed_amount};
use crate::config::LeakConfig;
use crate::models::{Classification, Transaction};

/// A frequent, small-average expense group that is cumulatively material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeakCandidate {
    pub name: String,
    pub count: usize,
    /// Positive (absolute) cumulative amount
    pub total_amount: f64,
    pub avg_amount: f64,
    /// Largest single charge in the group
    pub spike_amount: f64,
    pub sample_tx_ids: Vec<String>,
    pub confidence: f64,
    pub reason: String,
}

/// Detect leak candidates among expense transactions.
///
/// A group survives when it has at least `min_count` occurrences, its total
/// reaches `min_total`, and its average stays at or under `max_avg`. Results
/// are sorted by confidence descending, ties broken by total descending.
pub fn detect_leaks(txs: &[Transaction], config: &LeakConfig) -> Vec<LeakCandidate> {
    let min_count = config.min_count();
    let min_total = config.min_total();
    let max_avg = config.max_avg();

    let mut by_name: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in txs {
        if tx.classification != Classification::Expense {
            continue;
        }
        by_name.entry(tx.name.as_str()).or_default().push(tx);
    }

    let mut out = Vec::new();
    for (name, list) in by_name {
        if list.len() < min_count {
            continue;
        }

        let mut total = 0.0;
        let mut spike = 0.0_f64;
        let mut sample_tx_ids = Vec::with_capacity(list.len().min(3));
        for (i, tx) in list.iter().enumerate() {
            if i < 3 {
                sample_tx_ids.push(tx.id.clone());
            }
            let amt = match signed_amount(tx) {
                Ok(v) => v.abs(),
                Err(_) => continue,
            };
            total += amt;
            spike = spike.max(amt);
        }
        let avg = total / list.len() as f64;

        if total < min_total {
            continue;
        }
        if avg > max_avg {
            continue;
        }

        let mut confidence: f64 = 0.6;
        if list.len() >= 5 {
            confidence += 0.15;
        }
        if total >= 50.0 {
            confidence += 0.10;
        }
        let confidence = confidence.min(1.0);

        out.push(LeakCandidate {
            name: name.to_string(),
            count: list.len(),
            total_amount: round2(total),
            avg_amount: round2(avg),
            spike_amount: round2(spike),
            sample_tx_ids,
            confidence,
            reason: "small_frequent_expenses".to_string(),
        });
    }

    out.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.total_amount
                    .partial_cmp(&a.total_amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    debug!(candidates = out.len(), "leak detection complete");
    out
}
