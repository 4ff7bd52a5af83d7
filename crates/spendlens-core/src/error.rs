//! Error types for Spendlens

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Amount text could not be parsed. Non-fatal: batch computations skip
    /// the offending transaction's amount and keep going.
    #[error("Amount parse error: {0}")]
    Parse(String),

    /// Invalid input to a single computation (e.g. a bad balance string).
    /// Fatal to that computation; no partial result is returned.
    #[error("Invalid data: {0}")]
    Validation(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: status {status} on {path}")]
    Api { status: u16, path: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
