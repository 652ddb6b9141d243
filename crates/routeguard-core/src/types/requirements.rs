//! Declarative access policy attached to a route.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::access::{PermissionLevel, Platform};

/// Requirements a session must satisfy to view a route.
///
/// Optional sets that are present but empty behave exactly like absent ones; the
/// accessors below only return `Some` for a non-empty declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteRequirements {
    /// Coarse access tier.
    #[serde(default)]
    pub permission: PermissionLevel,
    /// Platforms the route may be shown on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<BTreeSet<Platform>>,
    /// Feature flags that must all be enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeSet<String>>,
    /// Roles of which the user must hold at least one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeSet<String>>,
    /// Subscription plans of which the user must hold at least one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<BTreeSet<String>>,
    /// Oldest application version allowed to show the route.
    #[serde(default, alias = "minVersion", skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    /// Whether the route is limited to beta testers.
    #[serde(default, alias = "betaAccess", skip_serializing_if = "Option::is_none")]
    pub beta_access: Option<bool>,
}

impl RouteRequirements {
    /// Requirements with only a permission tier.
    pub fn new(permission: PermissionLevel) -> Self {
        Self {
            permission,
            ..Self::default()
        }
    }

    /// Open route: public and nothing else.
    pub fn public() -> Self {
        Self::new(PermissionLevel::Public)
    }

    /// Restrict to the given platforms.
    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platform = Some(platforms.into_iter().collect());
        self
    }

    /// Require the given feature flags.
    pub fn with_features<S: Into<String>>(mut self, features: impl IntoIterator<Item = S>) -> Self {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// Require one of the given roles.
    pub fn with_roles<S: Into<String>>(mut self, roles: impl IntoIterator<Item = S>) -> Self {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    /// Require one of the given subscription plans.
    pub fn with_subscription<S: Into<String>>(
        mut self,
        plans: impl IntoIterator<Item = S>,
    ) -> Self {
        self.subscription = Some(plans.into_iter().map(Into::into).collect());
        self
    }

    /// Require a minimum application version.
    pub fn with_min_version(mut self, version: impl Into<String>) -> Self {
        self.min_version = Some(version.into());
        self
    }

    /// Gate the route on beta access.
    pub fn with_beta_access(mut self, required: bool) -> Self {
        self.beta_access = Some(required);
        self
    }

    /// Declared platform set, if non-empty.
    pub fn platforms(&self) -> Option<&BTreeSet<Platform>> {
        self.platform.as_ref().filter(|set| !set.is_empty())
    }

    /// Declared feature set, if non-empty.
    pub fn required_features(&self) -> Option<&BTreeSet<String>> {
        self.features.as_ref().filter(|set| !set.is_empty())
    }

    /// Declared role set, if non-empty.
    pub fn required_roles(&self) -> Option<&BTreeSet<String>> {
        self.roles.as_ref().filter(|set| !set.is_empty())
    }

    /// Declared subscription set, if non-empty.
    pub fn required_subscription(&self) -> Option<&BTreeSet<String>> {
        self.subscription.as_ref().filter(|set| !set.is_empty())
    }

    /// Declared minimum version, if non-blank.
    pub fn required_min_version(&self) -> Option<&str> {
        self.min_version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Returns `true` when beta access is demanded.
    pub fn requires_beta(&self) -> bool {
        self.beta_access == Some(true)
    }

    /// Returns `true` for a public route that declares nothing else.
    ///
    /// Such a route is granted regardless of session state, even while the session is
    /// still resolving.
    pub fn is_unrestricted(&self) -> bool {
        !self.permission.requires_authentication()
            && self.platforms().is_none()
            && self.required_features().is_none()
            && self.required_roles().is_none()
            && self.required_subscription().is_none()
            && self.required_min_version().is_none()
            && !self.requires_beta()
    }

    /// Returns `true` when evaluating the route depends on the remote lookups.
    pub fn needs_lookups(&self) -> bool {
        self.required_min_version().is_some() || self.required_features().is_some()
    }
}
