//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendlens - client-side insights for your finance service
#[derive(Parser)]
#[command(name = "spendlens")]
#[command(about = "Finance-service CLI with client-side spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file path (default: platform config dir, or
    /// SPENDLENS_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List accounts with their balances
    Accounts,

    /// Fetch transactions for a date range
    Transactions {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },

    /// Heuristic insights over recent transactions
    Insights {
        #[command(subcommand)]
        action: InsightsAction,
    },

    /// Propose automations from transaction patterns
    Propose {
        #[command(subcommand)]
        action: ProposeAction,
    },

    /// Planning projections (budget, runway, forecast)
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
}

#[derive(Subcommand)]
pub enum InsightsAction {
    /// Detect bank and service fees
    Fees {
        /// Lookback window in months
        #[arg(long, default_value = "3")]
        months: u32,

        /// Keyword to match (repeatable; replaces the built-in vocabulary)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },

    /// Detect small frequent expenses that add up
    Leaks {
        /// Lookback window in months
        #[arg(long, default_value = "3")]
        months: u32,

        /// Minimum occurrences per merchant
        #[arg(long)]
        min_count: Option<usize>,

        /// Minimum cumulative total
        #[arg(long)]
        min_total: Option<f64>,

        /// Maximum average per transaction
        #[arg(long)]
        max_avg: Option<f64>,
    },

    /// Detect recurring subscriptions
    Subscriptions {
        /// Lookback window in months
        #[arg(long, default_value = "6")]
        months: u32,
    },
}

#[derive(Subcommand)]
pub enum ProposeAction {
    /// Propose categorization rules based on transaction patterns
    Rules {
        /// Lookback window in months
        #[arg(long, default_value = "3")]
        months: u32,
    },
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Budget pacing for a month
    Budget {
        /// Target month (YYYY-MM; defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Estimate runway months based on recent spending
    Runway {
        /// Cash account id whose balance to use
        #[arg(long)]
        account_id: String,

        /// Lookback window in days
        #[arg(long, default_value = "90")]
        days: u32,
    },

    /// Project spending over a future horizon
    Forecast {
        /// Forecast horizon in days
        #[arg(long, default_value = "30")]
        days: u32,

        /// Include a day-by-day breakdown
        #[arg(long)]
        daily: bool,

        /// Lookback window in months used as the basis
        #[arg(long, default_value = "3")]
        months: u32,
    },
}
