//! Currency amount parsing
//!
//! The finance service formats amounts as locale-dependent strings like
//! "€112.00", "-€2.00" or "€1,23". Everything downstream of the API works in
//! plain f64, so this module is the single place that turns amount text into
//! numbers and resolves the expense/income sign ambiguity.

use crate::error::{Error, Result};
use crate::models::{Classification, Transaction};

/// Parse a currency-formatted string into a numeric value.
///
/// Handles an optional leading `-`, currency glyphs, and both separator
/// conventions: if `,` and `.` are both present `,` is a thousands separator
/// ("2,000.00"); a lone `,` is a decimal comma ("1,23").
pub fn parse_amount(text: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Parse("empty amount".to_string()));
    }

    let (neg, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '€' | '$' | '£'))
        .collect();

    if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.retain(|c| c != ',');
    } else {
        cleaned = cleaned.replace(',', ".");
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| Error::Parse(format!("unparsable amount: {text:?}")))?;

    Ok(if neg { -value } else { value })
}

/// Resolve the canonical signed amount for a transaction.
///
/// The classification is the ground truth for sign: income is positive,
/// expense is negative, anything else passes the parsed sign through. This is
/// the only sign-of-truth used by the detectors.
pub fn signed_amount(tx: &Transaction) -> Result<f64> {
    let value = parse_amount(&tx.amount_text)?;
    Ok(match tx.classification {
        Classification::Income => value.abs(),
        Classification::Expense => -value.abs(),
        Classification::Other => value,
    })
}

/// Round to 2 decimal places, half away from zero.
/// All public output amounts go through this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
