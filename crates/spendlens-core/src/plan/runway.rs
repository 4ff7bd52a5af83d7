//! Runway estimation
//!
//! How many months a cash balance lasts at the trailing average burn rate.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::amount::{parse_amount, round2, signed_amount};
use crate::error::{Error, Result};
use crate::models::{Classification, Transaction};

/// Balance depletion projection from a trailing spending window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunwaySummary {
    pub balance: f64,
    /// Average daily burn over the window, extrapolated to a 30-day month
    pub avg_monthly_burn: f64,
    /// 0 when the burn is 0: undefined/infinite runway, not an error
    pub runway_months: f64,
    pub currency: Option<String>,
    pub window_days: u32,
    pub assumptions: Vec<String>,
}

/// Estimate runway months from a balance string and recent expenses.
///
/// An unparsable balance is a hard failure; no partial result comes back.
/// Expenses dated in [today - window_days, today] contribute their absolute
/// amount, skipping any with unparsable text. A window of 0 days yields zero
/// burn and therefore zero (undefined) runway.
pub fn compute_runway(
    balance_text: &str,
    txs: &[Transaction],
    window_days: u32,
    today: NaiveDate,
) -> Result<RunwaySummary> {
    let balance = parse_amount(balance_text)
        .map_err(|_| Error::Validation(format!("invalid balance: {balance_text:?}")))?;

    let start = today - Duration::days(i64::from(window_days));

    let mut spent = 0.0;
    let mut currency = None;
    for tx in txs {
        if tx.date < start || tx.date > today {
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

    let avg_monthly_burn = if window_days > 0 {
        spent / f64::from(window_days) * 30.0
    } else {
        0.0
    };
    let runway_months = if avg_monthly_burn > 0.0 {
        balance / avg_monthly_burn
    } else {
        0.0
    };

    Ok(RunwaySummary {
        balance: round2(balance),
        avg_monthly_burn: round2(avg_monthly_burn),
        runway_months: round2(runway_months),
        currency,
        window_days,
        assumptions: vec![
            "expense sign normalized via classification; burn extrapolated to 30-day month"
                .to_string(),
        ],
    })
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
    fn test_runway_basic() {
        let txs = vec![
            expense("1", "€450.00", "2026-03-10"),
            expense("2", "€450.00", "2026-03-20"),
        ];
        let out = compute_runway("€3,000.00", &txs, 90, date("2026-04-01")).unwrap();
        assert_eq!(out.balance, 3000.00);
        // 900 over 90 days -> 10/day -> 300/month
        assert_eq!(out.avg_monthly_burn, 300.00);
        assert_eq!(out.runway_months, 10.00);
        assert_eq!(out.window_days, 90);
    }

    #[test]
    fn test_runway_zero_burn_means_undefined_not_error() {
        let out = compute_runway("€500.00", &[], 90, date("2026-04-01")).unwrap();
        assert_eq!(out.avg_monthly_burn, 0.0);
        assert_eq!(out.runway_months, 0.0);
    }

    #[test]
    fn test_runway_invalid_balance_is_hard_failure() {
        let err = compute_runway("not-money", &[], 90, date("2026-04-01")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_runway_window_bounds() {
        let txs = vec![
            // Inside the 30-day window
            expense("1", "€300.00", "2026-03-15"),
            // Just outside
            expense("2", "€900.00", "2026-02-25"),
        ];
        let out = compute_runway("€600.00", &txs, 30, date("2026-04-01")).unwrap();
        // 300 over 30 days -> 300/month
        assert_eq!(out.avg_monthly_burn, 300.00);
        assert_eq!(out.runway_months, 2.00);
    }
}
