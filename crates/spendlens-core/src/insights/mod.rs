//! Heuristic transaction-stream detectors
//!
//! Each detector is a pure function over an in-memory transaction list:
//! no I/O, no shared state, deterministic output order for a given input.
//!
//! - **Fees** - expense groups whose name matches a fee keyword vocabulary
//! - **Leaks** - frequent, small-average expense groups that add up
//! - **Subscriptions** - recurring charges with regular spacing and stable
//!   amounts
//!
//! All three partition transactions by exact, case-sensitive display-name
//! equality. Groups are collected into ordered maps so equal-confidence
//! candidates sort lexicographically rather than by map iteration luck.

pub mod fees;
pub mod leaks;
pub mod subscriptions;

pub use fees::{detect_fees, FeeCandidate, DEFAULT_FEE_KEYWORDS};
pub use leaks::{detect_leaks, LeakCandidate};
pub use subscriptions::{detect_subscriptions, SubscriptionCandidate};

/// Mean and population standard deviation of a sample.
pub(crate) fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    (mean, variance.sqrt())
}
