//! Rule proposal command

use anyhow::Result;

use super::{client, months_window, print_json, today};
use crate::settings::Settings;
use spendlens_core::propose_rules;

pub async fn cmd_propose_rules(settings: &Settings, months: u32) -> Result<()> {
    let (start, end) = months_window(months, today());
    let txs = client(settings)?
        .fetch_transactions_window(start, end, 0)
        .await?;

    // The outcome carries every affected transaction id; applying the
    // reclassification is the service UI's job
    print_json(&propose_rules(&txs, &settings.heuristics.rules))
}
