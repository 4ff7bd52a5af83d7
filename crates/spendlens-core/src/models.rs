//! Domain models for Spendlens
//!
//! These are the normalized records the analytics core operates on. All
//! dynamic decoding of API payloads happens in the `api` module; by the time
//! a `Transaction` reaches a detector it is fully typed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transaction polarity as reported by the finance service.
///
/// Classification is the sole source of truth for sign: the amount text's
/// own sign, if present, is informational only and is discarded in favor of
/// the classification-derived sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Income,
    Expense,
    /// Anything the service reports that is neither income nor expense
    /// (transfers, adjustments). Signed amounts pass through unchanged.
    Other,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Ok(Self::Other),
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Unknown wire values become Other rather than failing the whole page
impl<'de> Deserialize<'de> for Classification {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or(Self::Other))
    }
}

/// A normalized transaction from the finance service.
///
/// The display name is the grouping key for every detector. It is free text,
/// not a stable merchant ID; grouping is exact and case-sensitive on purpose
/// (a documented heuristic limitation, not fuzzy merchant matching).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque identifier, unique within a fetch window
    pub id: String,
    /// Display name (free text)
    pub name: String,
    /// Authoritative polarity; overrides the amount text's literal sign
    pub classification: Classification,
    /// Currency-formatted amount string, e.g. "€9.99" or "-€12,34".
    /// Parsing is the analytics core's job, see `amount::parse_amount`.
    pub amount_text: String,
    pub currency: String,
    pub date: NaiveDate,
    pub account_name: String,
    /// None = uncategorized
    pub category_name: Option<String>,
    pub category_id: Option<String>,
    pub merchant_name: Option<String>,
}

/// An account as listed by the finance service.
///
/// Balances arrive as currency-formatted strings; the runway estimator is
/// the only consumer that parses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub balance_text: String,
    pub currency: String,
    /// Account kind as reported by the service (e.g. "asset", "liability")
    pub classification: Option<String>,
}
