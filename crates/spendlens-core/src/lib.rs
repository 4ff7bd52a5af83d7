//! Spendlens Core Library
//!
//! Shared functionality for the Spendlens finance-service CLI:
//! - Typed API client for paginated transaction and account fetches
//! - Currency amount parsing with classification-derived sign
//! - Heuristic detectors (fees, leaks, subscriptions) over transaction
//!   windows
//! - Categorization-rule proposals
//! - Planning projections (budget pacing, runway, spend forecast)
//!
//! The analytics modules are pure functions over in-memory transaction
//! lists: no I/O, no shared state, deterministic output for a given input
//! and clock.

pub mod amount;
pub mod api;
pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod plan;
pub mod rules;

pub use amount::{parse_amount, round2, signed_amount};
pub use api::{Auth, Client};
pub use config::{FeeConfig, Heuristics, LeakConfig, RuleConfig, SubscriptionConfig};
pub use error::{Error, Result};
pub use insights::{
    detect_fees, detect_leaks, detect_subscriptions, FeeCandidate, LeakCandidate,
    SubscriptionCandidate, DEFAULT_FEE_KEYWORDS,
};
pub use models::{Account, Classification, Transaction};
pub use plan::{
    compute_forecast, compute_monthly_budget, compute_runway, BudgetSummary, DailyForecast,
    ForecastResult, ForecastSummary, RunwaySummary,
};
pub use rules::{propose_rules, ProposeOutcome, RuleAction, RuleProposal};
