//! Routeguard configuration
//!
//! Every section has defaults, so an empty TOML document is a valid configuration.
//!
//! ```toml
//! [redirects]
//! login = "/auth/sign-in"
//!
//! [lookups]
//! failure_policy = "fail-closed"
//! base_url = "https://app.example.com"
//!
//! [navigation]
//! max_retries = 5
//!
//! [[routes]]
//! path = "/admin"
//! requirements = { permission = "admin", roles = ["admin"] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::backoff::BackoffStrategy;
use crate::platform::PlatformResolver;
use crate::types::RouteRequirements;
use crate::{Result, RouteguardError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteguardConfig {
    /// Where each failed check sends the user.
    pub redirects: RedirectPaths,
    /// Remote version and feature-flag lookups.
    pub lookups: LookupConfig,
    /// Dispatcher and history settings.
    pub navigation: NavigationConfig,
    /// Path → platform table.
    pub platforms: PlatformResolver,
    /// Route table.
    pub routes: Vec<RouteEntry>,
}

impl RouteguardConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: RouteguardConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            RouteguardError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            path = %path.display(),
            routes = config.routes.len(),
            failure_policy = ?config.lookups.failure_policy,
            "Loaded routeguard config"
        );
        Ok(config)
    }

    /// Reject values the runtime cannot work with.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in self.redirects.entries() {
            ensure_absolute(name, path)?;
        }
        ensure_absolute("navigation.fallback_path", &self.navigation.fallback_path)?;
        if self.navigation.max_retries == 0 {
            return Err(RouteguardError::config(
                "navigation.max_retries must be at least 1",
            ));
        }
        if self.navigation.history_capacity == 0 {
            return Err(RouteguardError::config(
                "navigation.history_capacity must be at least 1",
            ));
        }
        for route in &self.routes {
            ensure_absolute("routes.path", &route.path)?;
        }
        Ok(())
    }
}

fn ensure_absolute(name: &str, path: &str) -> Result<()> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(RouteguardError::config(format!(
            "{name} must be an absolute path, got {path:?}"
        )))
    }
}

/// Redirect targets, one per check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectPaths {
    /// Unauthenticated user on a protected route.
    pub login: String,
    /// Route not available on the current platform.
    pub platform_not_supported: String,
    /// Missing role.
    pub unauthorized: String,
    /// Missing subscription.
    pub pricing: String,
    /// Application older than the route's minimum version.
    pub update_required: String,
    /// Route limited to beta testers.
    pub beta_required: String,
    /// A required feature flag is off.
    pub feature_disabled: String,
}

impl Default for RedirectPaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            platform_not_supported: "/error/platform-not-supported".to_string(),
            unauthorized: "/error/unauthorized".to_string(),
            pricing: "/pricing".to_string(),
            update_required: "/error/update-required".to_string(),
            beta_required: "/error/beta-required".to_string(),
            feature_disabled: "/error/feature-disabled".to_string(),
        }
    }
}

impl RedirectPaths {
    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("redirects.login", &self.login),
            ("redirects.platform_not_supported", &self.platform_not_supported),
            ("redirects.unauthorized", &self.unauthorized),
            ("redirects.pricing", &self.pricing),
            ("redirects.update_required", &self.update_required),
            ("redirects.beta_required", &self.beta_required),
            ("redirects.feature_disabled", &self.feature_disabled),
        ]
    }
}

/// What a check does when its remote lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupFailurePolicy {
    /// Treat the unknown answer as passing.
    #[default]
    FailOpen,
    /// Deny and redirect to the check's own target.
    FailClosed,
}

/// Remote lookup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Failure policy for the version and feature-flag checks.
    pub failure_policy: LookupFailurePolicy,
    /// Origin serving `/api/version` and `/api/features/check`.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            failure_policy: LookupFailurePolicy::default(),
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Dispatcher and history settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Total attempts before falling back.
    pub max_retries: u32,
    /// How delays grow between attempts.
    pub backoff: BackoffStrategy,
    /// Backoff unit; with exponential backoff attempt `k` waits `base_delay_ms * 2^k`.
    pub base_delay_ms: u64,
    /// Upper bound for a single backoff delay.
    pub max_delay_ms: u64,
    /// Where to land when every attempt failed.
    pub fallback_path: String,
    /// History ring buffer size.
    pub history_capacity: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: BackoffStrategy::Exponential,
            base_delay_ms: 1_000,
            max_delay_ms: 60_000,
            fallback_path: "/".to_string(),
            history_capacity: 50,
        }
    }
}

/// One route of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Path prefix the requirements apply to.
    pub path: String,
    /// Requirements for paths under `path`.
    #[serde(default)]
    pub requirements: RouteRequirements,
}
