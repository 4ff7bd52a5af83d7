//! CLI argument parsing tests

use clap::Parser;

use crate::cli::{Cli, Commands, InsightsAction, PlanAction};

#[test]
fn test_parse_accounts() {
    let cli = Cli::parse_from(["spendlens", "accounts"]);
    assert!(matches!(cli.command, Commands::Accounts));
}

#[test]
fn test_parse_insights_fees_with_keywords() {
    let cli = Cli::parse_from([
        "spendlens",
        "insights",
        "fees",
        "--months",
        "6",
        "--keyword",
        "levy",
        "--keyword",
        "toll",
    ]);
    let Commands::Insights {
        action: InsightsAction::Fees { months, keywords },
    } = cli.command
    else {
        panic!("expected insights fees");
    };
    assert_eq!(months, 6);
    assert_eq!(keywords, vec!["levy", "toll"]);
}

#[test]
fn test_parse_insights_leaks_defaults() {
    let cli = Cli::parse_from(["spendlens", "insights", "leaks"]);
    let Commands::Insights {
        action:
            InsightsAction::Leaks {
                months,
                min_count,
                min_total,
                max_avg,
            },
    } = cli.command
    else {
        panic!("expected insights leaks");
    };
    assert_eq!(months, 3);
    // Omitted flags stay None so the settings file and built-in fallbacks
    // can apply
    assert_eq!(min_count, None);
    assert_eq!(min_total, None);
    assert_eq!(max_avg, None);
}

#[test]
fn test_parse_plan_runway_requires_account() {
    assert!(Cli::try_parse_from(["spendlens", "plan", "runway"]).is_err());

    let cli = Cli::parse_from(["spendlens", "plan", "runway", "--account-id", "acc-1"]);
    let Commands::Plan {
        action: PlanAction::Runway { account_id, days },
    } = cli.command
    else {
        panic!("expected plan runway");
    };
    assert_eq!(account_id, "acc-1");
    assert_eq!(days, 90);
}

#[test]
fn test_parse_plan_forecast_daily() {
    let cli = Cli::parse_from(["spendlens", "plan", "forecast", "--days", "45", "--daily"]);
    let Commands::Plan {
        action: PlanAction::Forecast {
            days,
            daily,
            months,
        },
    } = cli.command
    else {
        panic!("expected plan forecast");
    };
    assert_eq!(days, 45);
    assert!(daily);
    assert_eq!(months, 3);
}

#[test]
fn test_global_config_flag() {
    let cli = Cli::parse_from(["spendlens", "accounts", "--config", "/tmp/settings.toml"]);
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/settings.toml"))
    );
}
