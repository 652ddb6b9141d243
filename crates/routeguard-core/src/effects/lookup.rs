//! Remote lookups consulted by the version and feature-flag checks.

use async_trait::async_trait;
use std::sync::Arc;

use crate::Result;

/// Reports the version of the running application.
#[async_trait]
pub trait VersionEffects: Send + Sync {
    /// Current application version, e.g. `"2.4.1"`.
    async fn app_version(&self) -> Result<String>;
}

/// Resolves feature flags.
#[async_trait]
pub trait FeatureFlagEffects: Send + Sync {
    /// Subset of `features` that is currently disabled.
    async fn disabled_features(&self, features: &[String]) -> Result<Vec<String>>;
}

/// Composite requirement for access validation.
pub trait LookupEffects: VersionEffects + FeatureFlagEffects {}

impl<T> LookupEffects for T where T: VersionEffects + FeatureFlagEffects {}

#[async_trait]
impl<T: VersionEffects + ?Sized> VersionEffects for Arc<T> {
    async fn app_version(&self) -> Result<String> {
        (**self).app_version().await
    }
}

#[async_trait]
impl<T: FeatureFlagEffects + ?Sized> FeatureFlagEffects for Arc<T> {
    async fn disabled_features(&self, features: &[String]) -> Result<Vec<String>> {
        (**self).disabled_features(features).await
    }
}
