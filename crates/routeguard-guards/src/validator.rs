//! Access validator
//!
//! Checks a route's requirements against the session in a fixed precedence order and
//! stops at the first failure:
//!
//! ```text
//! permission → platform → roles → subscription → min version → beta → features
//!                                                 ^^^^^^^^^^^           ^^^^^^^^
//!                                                 (remote lookup)       (remote lookup)
//! ```
//!
//! A session that is still resolving yields `Pending` instead of a denial. Lookup failures
//! never abort the chain: they are logged and resolved by the configured
//! `LookupFailurePolicy`.

use routeguard_core::{
    satisfies_minimum, LookupEffects, LookupFailurePolicy, PlatformResolver, RedirectPaths,
    RouteRequirements, RouteguardConfig, RouteguardError, SessionState,
};
use tracing::{debug, warn};

use crate::checks::{check_beta, check_permission, check_platform, check_roles, check_subscription};
use crate::decision::{AccessDecision, Denial, DenialReason, LookupCheck};

/// Validates route requirements against a session.
#[derive(Debug, Clone)]
pub struct AccessValidator<L> {
    lookups: L,
    redirects: RedirectPaths,
    platforms: PlatformResolver,
    failure_policy: LookupFailurePolicy,
}

impl<L: LookupEffects> AccessValidator<L> {
    /// Validator with default redirects, platform table and fail-open lookups.
    pub fn new(lookups: L) -> Self {
        Self {
            lookups,
            redirects: RedirectPaths::default(),
            platforms: PlatformResolver::default(),
            failure_policy: LookupFailurePolicy::default(),
        }
    }

    /// Validator configured from `config`.
    pub fn from_config(lookups: L, config: &RouteguardConfig) -> Self {
        Self {
            lookups,
            redirects: config.redirects.clone(),
            platforms: config.platforms.clone(),
            failure_policy: config.lookups.failure_policy,
        }
    }

    /// Override the redirect targets.
    pub fn with_redirects(mut self, redirects: RedirectPaths) -> Self {
        self.redirects = redirects;
        self
    }

    /// Override the platform table.
    pub fn with_platforms(mut self, platforms: PlatformResolver) -> Self {
        self.platforms = platforms;
        self
    }

    /// Override the lookup failure policy.
    pub fn with_failure_policy(mut self, policy: LookupFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Redirect targets in use.
    pub fn redirects(&self) -> &RedirectPaths {
        &self.redirects
    }

    /// Lookup failure policy in use.
    pub fn failure_policy(&self) -> LookupFailurePolicy {
        self.failure_policy
    }

    /// Validate `requirements` for `session` on `current_path`.
    pub async fn validate_access(
        &self,
        requirements: &RouteRequirements,
        session: &SessionState,
        current_path: &str,
    ) -> AccessDecision {
        if requirements.is_unrestricted() {
            return AccessDecision::Allowed;
        }
        if !session.is_resolved() {
            debug!(path = current_path, "Session resolving, access decision deferred");
            return AccessDecision::Pending;
        }

        let denial = self
            .first_denial(requirements, session, current_path)
            .await;
        let decision = AccessDecision::from(denial);
        match &decision {
            AccessDecision::Denied(denial) => debug!(
                path = current_path,
                reason = %denial.reason,
                redirect = %denial.redirect,
                "Route access denied"
            ),
            _ => debug!(path = current_path, "Route access granted"),
        }
        decision
    }

    /// Redirect path for `session` on `current_path`, or `None` when access is granted
    /// or still pending.
    pub async fn redirect_for(
        &self,
        requirements: &RouteRequirements,
        session: &SessionState,
        current_path: &str,
    ) -> Option<String> {
        self.validate_access(requirements, session, current_path)
            .await
            .redirect_path()
            .map(str::to_string)
    }

    async fn first_denial(
        &self,
        requirements: &RouteRequirements,
        session: &SessionState,
        current_path: &str,
    ) -> Option<Denial> {
        let user = session.user();

        if let Some(denial) = check_permission(requirements, session, &self.redirects) {
            return Some(denial);
        }
        if let Some(denial) =
            check_platform(requirements, current_path, &self.platforms, &self.redirects)
        {
            return Some(denial);
        }
        if let Some(denial) = check_roles(requirements, user, &self.redirects) {
            return Some(denial);
        }
        if let Some(denial) = check_subscription(requirements, user, &self.redirects) {
            return Some(denial);
        }
        if let Some(denial) = self.check_min_version(requirements).await {
            return Some(denial);
        }
        if let Some(denial) = check_beta(requirements, user, &self.redirects) {
            return Some(denial);
        }
        self.check_features(requirements).await
    }

    /// Step 5: running application must not be older than the route's minimum.
    async fn check_min_version(&self, requirements: &RouteRequirements) -> Option<Denial> {
        let minimum = requirements.required_min_version()?;
        let redirect = &self.redirects.update_required;

        match self.lookups.app_version().await {
            Ok(running) if satisfies_minimum(&running, minimum) => None,
            Ok(running) => Some(Denial::new(
                DenialReason::UpdateRequired {
                    running,
                    minimum: minimum.to_string(),
                },
                redirect,
            )),
            Err(err) => self.lookup_failed(LookupCheck::Version, &err, redirect),
        }
    }

    /// Step 7: every required feature flag must be enabled.
    async fn check_features(&self, requirements: &RouteRequirements) -> Option<Denial> {
        let features: Vec<String> = requirements.required_features()?.iter().cloned().collect();
        let redirect = &self.redirects.feature_disabled;

        match self.lookups.disabled_features(&features).await {
            Ok(disabled) => {
                let mut blocking: Vec<String> = disabled
                    .into_iter()
                    .filter(|f| features.contains(f))
                    .collect();
                if blocking.is_empty() {
                    return None;
                }
                blocking.sort();
                blocking.dedup();
                Some(Denial::new(
                    DenialReason::FeatureDisabled { features: blocking },
                    redirect,
                ))
            }
            Err(err) => self.lookup_failed(LookupCheck::Features, &err, redirect),
        }
    }

    fn lookup_failed(
        &self,
        check: LookupCheck,
        err: &RouteguardError,
        redirect: &str,
    ) -> Option<Denial> {
        match self.failure_policy {
            LookupFailurePolicy::FailOpen => {
                warn!(%check, error = %err, "Lookup failed, treating check as passed (fail-open)");
                None
            }
            LookupFailurePolicy::FailClosed => {
                warn!(%check, error = %err, "Lookup failed, denying access (fail-closed)");
                Some(Denial::new(
                    DenialReason::LookupUnavailable {
                        check,
                        message: err.to_string(),
                    },
                    redirect,
                ))
            }
        }
    }
}
