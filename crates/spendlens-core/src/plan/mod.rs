//! Planning projections
//!
//! Client-side time-series projections over a fetched transaction window:
//!
//! - **Budget** - month-end spend projected from month-to-date run rate
//! - **Runway** - months until a balance depletes at the trailing burn rate
//! - **Forecast** - spend over a future horizon from detected subscriptions
//!   plus a non-recurring daily average
//!
//! Every function takes `today` explicitly. With a fixed clock each one is a
//! pure function of its inputs, which is what makes them testable.

pub mod budget;
pub mod forecast;
pub mod runway;

pub use budget::{compute_monthly_budget, BudgetSummary};
pub use forecast::{compute_forecast, DailyForecast, ForecastResult, ForecastSummary};
pub use runway::{compute_runway, RunwaySummary};
