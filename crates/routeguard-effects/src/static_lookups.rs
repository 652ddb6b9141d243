//! Lookups with fixed answers.
//!
//! Used by the CLI to evaluate a route table offline: the caller states the running
//! version and the disabled features up front. Leaving the version unset makes the
//! version lookup fail, which exercises the configured failure policy.

use async_trait::async_trait;
use routeguard_core::{FeatureFlagEffects, Result, RouteguardError, VersionEffects};
use std::collections::BTreeSet;

/// Fixed version and feature-flag answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLookups {
    version: Option<String>,
    disabled: BTreeSet<String>,
}

impl StaticLookups {
    /// Lookups with no version and every feature enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `version` as the running version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Report `features` as disabled.
    pub fn with_disabled<S: Into<String>>(mut self, features: impl IntoIterator<Item = S>) -> Self {
        self.disabled.extend(features.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl VersionEffects for StaticLookups {
    async fn app_version(&self) -> Result<String> {
        self.version
            .clone()
            .ok_or_else(|| RouteguardError::network("no application version available"))
    }
}

#[async_trait]
impl FeatureFlagEffects for StaticLookups {
    async fn disabled_features(&self, features: &[String]) -> Result<Vec<String>> {
        Ok(features
            .iter()
            .filter(|f| self.disabled.contains(f.as_str()))
            .cloned()
            .collect())
    }
}
