//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `accounts` - account listing
//! - `transactions` - raw transaction window dumps
//! - `insights` - fee/leak/subscription detection commands
//! - `plan` - budget/runway/forecast commands
//! - `rules` - categorization-rule proposal command
//!
//! Every command fetches what it needs through the typed API client, runs
//! the relevant analytics, and prints the result as pretty JSON.

pub mod accounts;
pub mod insights;
pub mod plan;
pub mod rules;
pub mod transactions;

// Re-export command functions for main.rs
pub use accounts::*;
pub use insights::*;
pub use plan::*;
pub use rules::*;
pub use transactions::*;

use anyhow::{Context, Result};
use chrono::{Months, NaiveDate, Utc};
use serde::Serialize;

use crate::settings::Settings;
use spendlens_core::Client;

/// Build an API client from the loaded settings.
pub fn client(settings: &Settings) -> Result<Client> {
    Client::new(settings.api_url(), settings.auth()).context("building API client")
}

/// Today's date in UTC; the single clock every command passes into the core.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A lookback window of whole months ending today.
pub fn months_window(months: u32, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Months::new(months), today)
}

/// Print any serializable result as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
