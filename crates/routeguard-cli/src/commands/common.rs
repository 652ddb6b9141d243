//! Shared CLI helpers

use anyhow::{Context, Result};
use routeguard_core::{RouteguardConfig, SessionState};
use std::path::Path;

/// Load and validate the configuration, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<RouteguardConfig> {
    match path {
        Some(path) => RouteguardConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(RouteguardConfig::default()),
    }
}

/// Parse a session from JSON; anonymous when omitted.
pub fn parse_session(json: Option<&str>) -> Result<SessionState> {
    match json {
        Some(json) => serde_json::from_str(json).context("Failed to parse --session JSON"),
        None => Ok(SessionState::Anonymous),
    }
}
