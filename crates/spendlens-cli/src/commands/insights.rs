//! Insight command implementations
//!
//! Each command fetches a lookback window, resolves the effective heuristic
//! config (CLI flags override settings-file values, which override built-in
//! defaults), and prints the detector output.

use anyhow::Result;

use super::{client, months_window, print_json, today};
use crate::settings::Settings;
use spendlens_core::{detect_fees, detect_leaks, detect_subscriptions, FeeConfig, LeakConfig};

pub async fn cmd_insights_fees(
    settings: &Settings,
    months: u32,
    keywords: Vec<String>,
) -> Result<()> {
    let (start, end) = months_window(months, today());
    let txs = client(settings)?
        .fetch_transactions_window(start, end, 0)
        .await?;

    let config = if keywords.is_empty() {
        settings.heuristics.fees.clone()
    } else {
        FeeConfig { keywords }
    };
    print_json(&detect_fees(&txs, &config))
}

pub async fn cmd_insights_leaks(
    settings: &Settings,
    months: u32,
    min_count: Option<usize>,
    min_total: Option<f64>,
    max_avg: Option<f64>,
) -> Result<()> {
    let (start, end) = months_window(months, today());
    let txs = client(settings)?
        .fetch_transactions_window(start, end, 0)
        .await?;

    let base = &settings.heuristics.leaks;
    let config = LeakConfig {
        min_count: min_count.or(base.min_count),
        min_total: min_total.or(base.min_total),
        max_avg: max_avg.or(base.max_avg),
    };
    print_json(&detect_leaks(&txs, &config))
}

pub async fn cmd_insights_subscriptions(settings: &Settings, months: u32) -> Result<()> {
    let (start, end) = months_window(months, today());
    let txs = client(settings)?
        .fetch_transactions_window(start, end, 0)
        .await?;

    print_json(&detect_subscriptions(&txs, &settings.heuristics.subscriptions))
}
