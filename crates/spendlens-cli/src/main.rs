//! Spendlens CLI - client-side insights for a finance service
//!
//! Usage:
//!   spendlens accounts                       List accounts
//!   spendlens insights subscriptions         Detect recurring charges
//!   spendlens plan forecast --days 30        Project upcoming spend

mod cli;
mod commands;
mod settings;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Accounts => commands::cmd_accounts(&settings).await,
        Commands::Transactions { from, to } => {
            commands::cmd_transactions(&settings, &from, &to).await
        }
        Commands::Insights { action } => match action {
            InsightsAction::Fees { months, keywords } => {
                commands::cmd_insights_fees(&settings, months, keywords).await
            }
            InsightsAction::Leaks {
                months,
                min_count,
                min_total,
                max_avg,
            } => {
                commands::cmd_insights_leaks(&settings, months, min_count, min_total, max_avg)
                    .await
            }
            InsightsAction::Subscriptions { months } => {
                commands::cmd_insights_subscriptions(&settings, months).await
            }
        },
        Commands::Propose { action } => match action {
            ProposeAction::Rules { months } => {
                commands::cmd_propose_rules(&settings, months).await
            }
        },
        Commands::Plan { action } => match action {
            PlanAction::Budget { month } => {
                commands::cmd_plan_budget(&settings, month.as_deref()).await
            }
            PlanAction::Runway { account_id, days } => {
                commands::cmd_plan_runway(&settings, &account_id, days).await
            }
            PlanAction::Forecast {
                days,
                daily,
                months,
            } => commands::cmd_plan_forecast(&settings, days, daily, months).await,
        },
    }
}
