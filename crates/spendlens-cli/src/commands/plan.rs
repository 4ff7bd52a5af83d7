//! Planning command implementations

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Months, NaiveDate};

use super::{client, months_window, print_json, today};
use crate::settings::Settings;
use spendlens_core::{compute_forecast, compute_monthly_budget, compute_runway};

pub async fn cmd_plan_budget(settings: &Settings, month: Option<&str>) -> Result<()> {
    let today = today();
    let month_start = match month {
        Some(m) => NaiveDate::parse_from_str(&format!("{m}-01"), "%Y-%m-%d")
            .context("invalid --month (use YYYY-MM)")?,
        None => today.with_day(1).expect("day 1 always valid"),
    };
    let month_end = month_start + Months::new(1);

    let txs = client(settings)?
        .fetch_transactions_window(month_start, month_end, 0)
        .await?;
    print_json(&compute_monthly_budget(month_start, &txs, today))
}

pub async fn cmd_plan_runway(settings: &Settings, account_id: &str, days: u32) -> Result<()> {
    let client = client(settings)?;

    let accounts = client.list_accounts().await?;
    let Some(account) = accounts.iter().find(|a| a.id == account_id) else {
        bail!("account {account_id} not found in accounts list");
    };

    let today = today();
    let start = today - chrono::Duration::days(i64::from(days));
    let txs = client.fetch_transactions_window(start, today, 0).await?;

    let summary = compute_runway(&account.balance_text, &txs, days, today)
        .with_context(|| format!("computing runway for account {account_id}"))?;
    print_json(&summary)
}

pub async fn cmd_plan_forecast(
    settings: &Settings,
    days: u32,
    daily: bool,
    months: u32,
) -> Result<()> {
    let today = today();
    let (start, end) = months_window(months, today);
    let txs = client(settings)?
        .fetch_transactions_window(start, end, 0)
        .await?;

    print_json(&compute_forecast(
        &txs,
        days,
        daily,
        &settings.heuristics.subscriptions,
        today,
    ))
}
