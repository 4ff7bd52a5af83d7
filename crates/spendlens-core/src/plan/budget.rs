//! Budget pacing
//!
//! Sums a month's expenses and projects the month-end total from the
//! average daily spend so far. A linear run-rate view, not seasonally
//! adjusted.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::amount::{round2, signed_amount};
use crate::models::{Classification, Transaction};

/// Month-to-date spend and its linear month-end projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Target month, `YYYY-MM`
    pub month: String,
    pub days_elapsed: u32,
    pub days_in_month: u32,
    pub spent: f64,
    pub avg_per_day: f64,
    pub projected: f64,
    /// Currency of the first contributing transaction
    pub currency: Option<String>,
    pub assumptions: Vec<String>,
}

/// Compute budget pacing for the month containing `month`.
///
/// Expenses dated in [month start, next month start) contribute their
/// absolute amount; transactions with unparsable amounts are skipped. Days
/// elapsed counts the start day itself and is clamped to the month: zero
/// before the month begins, the full month length once it has passed.
pub fn compute_monthly_budget(
    month: NaiveDate,
    txs: &[Transaction],
    today: NaiveDate,
) -> BudgetSummary {
    let start = month.with_day(1).expect("day 1 always valid");
    let end = start + Months::new(1);
    let days_in_month = (end - start).num_days() as u32;

    let mut spent = 0.0;
    let mut currency = None;
    for tx in txs {
        if tx.date < start || tx.date >= end {
            continue;
        }
        if tx.classification != Classification::Expense {
            continue;
        }
        let Ok(amount) = signed_amount(tx) else {
            continue;
        };
        spent += amount.abs();
        if currency.is_none() {
            currency = Some(tx.currency.clone());
        }
    }

    let days_elapsed = if today < start {
        0
    } else if today >= end {
        days_in_month
    } else {
        (today - start).num_days() as u32 + 1
    };

    let avg_per_day = if days_elapsed > 0 {
        spent / f64::from(days_elapsed)
    } else {
        0.0
    };
    let projected = avg_per_day * f64::from(days_in_month);

    BudgetSummary {
        month: start.format("%Y-%m").to_string(),
        days_elapsed,
        days_in_month,
        spent: round2(spent),
        avg_per_day: round2(avg_per_day),
        projected: round2(projected),
        currency,
        assumptions: vec![
            "expense sign normalized via classification; uses month-to-date average".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, amount: &str, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            name: "Shop".to_string(),
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

    #[test]
    fn test_budget_mid_month_projection() {
        let txs = vec![
            expense("1", "€30.00", "2026-03-02"),
            expense("2", "€70.00", "2026-03-08"),
            // Outside the month, ignored
            expense("3", "€500.00", "2026-02-27"),
        ];
        let out = compute_monthly_budget(date("2026-03-01"), &txs, date("2026-03-10"));
        assert_eq!(out.month, "2026-03");
        assert_eq!(out.days_elapsed, 10);
        assert_eq!(out.days_in_month, 31);
        assert_eq!(out.spent, 100.00);
        assert_eq!(out.avg_per_day, 10.00);
        assert_eq!(out.projected, 310.00);
        assert_eq!(out.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_budget_future_month_has_no_elapsed_days() {
        let out = compute_monthly_budget(date("2026-07-01"), &[], date("2026-03-10"));
        assert_eq!(out.days_elapsed, 0);
        assert_eq!(out.avg_per_day, 0.0);
        assert_eq!(out.projected, 0.0);
    }

    #[test]
    fn test_budget_past_month_uses_full_length() {
        let txs = vec![expense("1", "€62.00", "2026-02-10")];
        let out = compute_monthly_budget(date("2026-02-01"), &txs, date("2026-05-01"));
        assert_eq!(out.days_elapsed, 28);
        assert_eq!(out.days_in_month, 28);
        assert_eq!(out.projected, 62.00);
    }

    #[test]
    fn test_budget_ignores_income_and_unparsable() {
        let mut income = expense("1", "€900.00", "2026-03-05");
        income.classification = Classification::Income;
        let txs = vec![income, expense("2", "junk", "2026-03-05")];
        let out = compute_monthly_budget(date("2026-03-01"), &txs, date("2026-03-10"));
        assert_eq!(out.spent, 0.0);
        assert_eq!(out.currency, None);
    }

    #[test]
    fn test_budget_accepts_any_day_of_month() {
        let out = compute_monthly_budget(date("2026-03-17"), &[], date("2026-03-10"));
        assert_eq!(out.month, "2026-03");
        assert_eq!(out.days_in_month, 31);
    }
}
