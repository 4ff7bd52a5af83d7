//! Transaction window command

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use super::{client, print_json};
use crate::settings::Settings;

pub async fn cmd_transactions(settings: &Settings, from: &str, to: &str) -> Result<()> {
    let start: NaiveDate = from.parse().context("invalid --from date (use YYYY-MM-DD)")?;
    let end: NaiveDate = to.parse().context("invalid --to date (use YYYY-MM-DD)")?;

    let txs = client(settings)?
        .fetch_transactions_window(start, end, 0)
        .await?;
    info!(count = txs.len(), %start, %end, "fetched transactions");
    print_json(&txs)
}
