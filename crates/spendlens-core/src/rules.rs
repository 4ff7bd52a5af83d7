//! Categorization-rule proposals
//!
//! Looks for merchants whose transactions almost always share one category
//! and proposes reclassifying the stragglers. The proposal carries the full
//! affected-ID list so a caller can execute the bulk update against the
//! service; the core itself never mutates anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RuleConfig;
use crate::models::Transaction;

/// Proposals are capped to the strongest few; anything past this is noise.
const MAX_PROPOSALS: usize = 20;

/// The mutation a proposal asks the caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    SetCategory,
}

impl RuleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetCategory => "set_category",
        }
    }
}

impl std::fmt::Display for RuleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A proposed categorization rule for one merchant name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleProposal {
    pub action: RuleAction,
    /// Merchant name the rule matches on
    pub pattern: String,
    /// Dominant category name
    pub value: String,
    /// Category identifier for applying the rule, when any group member
    /// carried one
    pub value_id: Option<String>,
    pub confidence: f64,
    pub reason: String,
    pub affected_count: usize,
    /// Every transaction to update, in input order
    pub affected_tx_ids: Vec<String>,
    /// Up to 3 of the affected IDs, for display
    pub sample_tx_ids: Vec<String>,
    pub suggested_action: String,
}

/// Proposal run summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposeOutcome {
    pub proposals: Vec<RuleProposal>,
    pub total_transactions: usize,
    pub uncategorized_count: usize,
}

/// Analyze transactions and propose categorization rules.
///
/// Groups all transactions (income included) by trimmed name. A group
/// proposes a rule when it has at least `min_occurrences` members, at least
/// one categorized member, a dominant category covering at least
/// `min_consistency` of the group, and at least one member whose category
/// differs from the dominant one. Equal-frequency categories tie-break to
/// the lexicographically smallest name, so the outcome never depends on map
/// iteration order. Results sort by confidence then affected count, capped
/// at the top 20.
pub fn propose_rules(txs: &[Transaction], config: &RuleConfig) -> ProposeOutcome {
    let min_consistency = config.min_consistency();
    let min_occurrences = config.min_occurrences();

    let uncategorized_count = txs
        .iter()
        .filter(|tx| tx.category_name.as_deref().map_or(true, str::is_empty))
        .count();

    let mut by_name: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in txs {
        let name = tx.name.trim();
        if name.is_empty() {
            continue;
        }
        by_name.entry(name).or_default().push(tx);
    }

    let mut proposals = Vec::new();
    for (name, list) in by_name {
        if list.len() < min_occurrences {
            continue;
        }

        // Tally categories among categorized members, remembering one
        // representative category id per category name
        let mut category_counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut category_ids: BTreeMap<&str, &str> = BTreeMap::new();
        for tx in &list {
            let Some(category) = tx.category_name.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            *category_counts.entry(category).or_insert(0) += 1;
            if let Some(id) = tx.category_id.as_deref().filter(|id| !id.is_empty()) {
                category_ids.entry(category).or_insert(id);
            }
        }
        if category_counts.is_empty() {
            // All uncategorized: nothing to infer from
            continue;
        }

        // Dominant category: highest count; the BTreeMap walk makes equal
        // counts resolve to the lexicographically smallest name
        let (dominant, dominant_count) = category_counts
            .iter()
            .fold(("", 0), |(best, best_count), (&cat, &count)| {
                if count > best_count {
                    (cat, count)
                } else {
                    (best, best_count)
                }
            });

        let consistency = dominant_count as f64 / list.len() as f64;
        if consistency < min_consistency {
            continue;
        }

        let affected_tx_ids: Vec<String> = list
            .iter()
            .filter(|tx| tx.category_name.as_deref() != Some(dominant))
            .map(|tx| tx.id.clone())
            .collect();
        if affected_tx_ids.is_empty() {
            // Already consistent, nothing to propose
            continue;
        }
        let sample_tx_ids: Vec<String> = affected_tx_ids.iter().take(3).cloned().collect();

        let confidence = (0.6 + consistency * 0.3 + if list.len() >= 5 { 0.1 } else { 0.0 })
            .min(1.0);

        proposals.push(RuleProposal {
            action: RuleAction::SetCategory,
            pattern: name.to_string(),
            value: dominant.to_string(),
            value_id: category_ids.get(dominant).map(|id| id.to_string()),
            confidence,
            reason: "consistent_categorization".to_string(),
            affected_count: affected_tx_ids.len(),
            suggested_action: format!(
                "Review and apply: would categorize {} transactions as {}",
                affected_tx_ids.len(),
                dominant
            ),
            affected_tx_ids,
            sample_tx_ids,
        });
    }

    proposals.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.affected_count.cmp(&a.affected_count))
    });
    proposals.truncate(MAX_PROPOSALS);

    debug!(
        proposals = proposals.len(),
        uncategorized = uncategorized_count,
        "rule proposal complete"
    );

    ProposeOutcome {
        proposals,
        total_transactions: txs.len(),
        uncategorized_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Classification;
    use chrono::NaiveDate;

    fn tx(id: &str, name: &str, category: Option<(&str, &str)>) -> Transaction {
        Transaction {
            id: id.to_string(),
            name: name.to_string(),
            classification: Classification::Expense,
            amount_text: "€5.00".to_string(),
            currency: "EUR".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            account_name: "Checking".to_string(),
            category_name: category.map(|(n, _)| n.to_string()),
            category_id: category.map(|(_, id)| id.to_string()),
            merchant_name: None,
        }
    }

    #[test]
    fn test_propose_rules_dominant_category() {
        let txs = vec![
            tx("1", "Starbucks", Some(("Coffee", "cat-1"))),
            tx("2", "Starbucks", Some(("Coffee", "cat-1"))),
            tx("3", "Starbucks", Some(("Coffee", "cat-1"))),
            tx("4", "Starbucks", None),
            tx("5", "Grocery", Some(("Food", "cat-2"))),
        ];
        let out = propose_rules(&txs, &RuleConfig::default());
        assert_eq!(out.proposals.len(), 1);
        let p = &out.proposals[0];
        assert_eq!(p.pattern, "Starbucks");
        assert_eq!(p.value, "Coffee");
        assert_eq!(p.value_id.as_deref(), Some("cat-1"));
        assert_eq!(p.affected_count, 1);
        assert_eq!(p.affected_tx_ids, vec!["4"]);
        assert!(p.confidence >= 0.7);
        assert_eq!(out.total_transactions, 5);
        assert_eq!(out.uncategorized_count, 1);
    }

    #[test]
    fn test_propose_rules_skips_consistent_groups() {
        let txs = vec![
            tx("1", "Starbucks", Some(("Coffee", "cat-1"))),
            tx("2", "Starbucks", Some(("Coffee", "cat-1"))),
        ];
        let out = propose_rules(&txs, &RuleConfig::default());
        assert!(out.proposals.is_empty());
    }

    #[test]
    fn test_propose_rules_skips_inconsistent_groups() {
        // Even three-way split: consistency 1/3 under the 0.7 floor
        let txs = vec![
            tx("1", "Amazon", Some(("Books", "cat-1"))),
            tx("2", "Amazon", Some(("Electronics", "cat-2"))),
            tx("3", "Amazon", Some(("Household", "cat-3"))),
        ];
        let out = propose_rules(&txs, &RuleConfig::default());
        assert!(out.proposals.is_empty());
    }

    #[test]
    fn test_propose_rules_skips_singletons_and_all_uncategorized() {
        let txs = vec![
            tx("1", "Grocery", Some(("Food", "cat-2"))),
            tx("2", "Kiosk", None),
            tx("3", "Kiosk", None),
        ];
        let out = propose_rules(&txs, &RuleConfig::default());
        assert!(out.proposals.is_empty());
        assert_eq!(out.uncategorized_count, 2);
    }

    #[test]
    fn test_propose_rules_tie_breaks_lexicographically() {
        // Two categories at equal frequency; only reachable with a lowered
        // consistency floor. "Bakery" < "Pastry" must win both runs.
        let txs = vec![
            tx("1", "Corner Shop", Some(("Pastry", "cat-p"))),
            tx("2", "Corner Shop", Some(("Bakery", "cat-b"))),
        ];
        let config = RuleConfig {
            min_consistency: Some(0.5),
            ..Default::default()
        };
        let out = propose_rules(&txs, &config);
        assert_eq!(out.proposals.len(), 1);
        assert_eq!(out.proposals[0].value, "Bakery");
        assert_eq!(out.proposals[0].value_id.as_deref(), Some("cat-b"));
        assert_eq!(out.proposals[0].affected_tx_ids, vec!["1"]);
    }

    #[test]
    fn test_propose_rules_group_size_boost_and_cap() {
        let mut txs: Vec<Transaction> = (0..5)
            .map(|i| tx(&format!("t{i}"), "Lidl", Some(("Groceries", "cat-g"))))
            .collect();
        txs.push(tx("t5", "Lidl", None));
        let out = propose_rules(&txs, &RuleConfig::default());
        let p = &out.proposals[0];
        // 0.6 + 0.3 * (5/6) + 0.1
        assert!((p.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_propose_rules_trims_names() {
        let txs = vec![
            tx("1", "  Starbucks ", Some(("Coffee", "cat-1"))),
            tx("2", "Starbucks", Some(("Coffee", "cat-1"))),
            tx("3", "Starbucks", Some(("Coffee", "cat-1"))),
            tx("4", "Starbucks", None),
        ];
        let out = propose_rules(&txs, &RuleConfig::default());
        assert_eq!(out.proposals.len(), 1);
        assert_eq!(out.proposals[0].pattern, "Starbucks");
        assert_eq!(out.proposals[0].affected_tx_ids, vec!["4"]);
    }

    #[test]
    fn test_propose_rules_sorted_and_truncated() {
        let mut txs = Vec::new();
        for g in 0..25 {
            for i in 0..3 {
                txs.push(tx(
                    &format!("g{g}-{i}"),
                    &format!("Merchant {g:02}"),
                    Some(("Shopping", "cat-s")),
                ));
            }
            txs.push(tx(&format!("g{g}-u"), &format!("Merchant {g:02}"), None));
        }
        let out = propose_rules(&txs, &RuleConfig::default());
        assert_eq!(out.proposals.len(), 20);
    }
}
