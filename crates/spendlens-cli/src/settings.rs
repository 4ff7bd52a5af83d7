//! Settings file handling
//!
//! Spendlens reads a small TOML file for the service URL, credentials, and
//! heuristic threshold overrides. The file is consumed, never written:
//! credential provisioning belongs to the service, not this client.
//!
//! Resolution order for the file path: `--config` flag, `SPENDLENS_CONFIG`,
//! then `<config dir>/spendlens/config.toml`. A missing file is fine and
//! yields defaults. `SPENDLENS_API_URL`, `SPENDLENS_TOKEN`, and
//! `SPENDLENS_API_KEY` override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use spendlens_core::{Auth, Heuristics};

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: Option<String>,
    pub auth: AuthSettings,
    pub heuristics: Heuristics,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// "bearer" (default) or "api_key"
    pub mode: Option<String>,
    pub token: Option<String>,
    pub api_key: Option<String>,
}

impl Settings {
    /// Load settings from the resolved path, then apply environment
    /// overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = resolve_path(explicit);
        let mut settings = match &path {
            Some(p) if p.exists() => {
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("reading settings file {}", p.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("parsing settings file {}", p.display()))?
            }
            _ => Self::default(),
        };
        if let Some(p) = &path {
            debug!(path = %p.display(), found = p.exists(), "resolved settings file");
        }

        if let Ok(url) = std::env::var("SPENDLENS_API_URL") {
            settings.api_url = Some(url);
        }
        if let Ok(token) = std::env::var("SPENDLENS_TOKEN") {
            settings.auth.token = Some(token);
        }
        if let Ok(key) = std::env::var("SPENDLENS_API_KEY") {
            settings.auth.api_key = Some(key);
        }

        Ok(settings)
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Resolve the auth scheme: api_key mode uses the key header, anything
    /// else sends the bearer token when one is configured.
    pub fn auth(&self) -> Auth {
        if self.auth.mode.as_deref() == Some("api_key") {
            if let Some(key) = self.auth.api_key.clone().filter(|k| !k.is_empty()) {
                return Auth::ApiKey(key);
            }
        }
        match self.auth.token.clone().filter(|t| !t.is_empty()) {
            Some(token) => Auth::Bearer(token),
            None => Auth::None,
        }
    }
}

fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Ok(p) = std::env::var("SPENDLENS_CONFIG") {
        return Some(PathBuf::from(p));
    }
    dirs::config_dir().map(|d| d.join("spendlens").join("config.toml"))
}
