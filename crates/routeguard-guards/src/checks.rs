//! Synchronous guard checks
//!
//! Each check returns `None` when it passes and `Some(Denial)` when it fails, so the
//! validator can short-circuit on the first failure. None of these touch the network;
//! the version and feature checks live in the validator because they need lookups.

use routeguard_core::{
    PlatformResolver, RedirectPaths, RouteRequirements, SessionState, UserProfile,
};

use crate::decision::{Denial, DenialReason};

/// Step 1: protected route requires a signed-in session.
pub fn check_permission(
    requirements: &RouteRequirements,
    session: &SessionState,
    redirects: &RedirectPaths,
) -> Option<Denial> {
    if requirements.permission.requires_authentication() && !session.is_authenticated() {
        Some(Denial::new(DenialReason::Unauthenticated, &redirects.login))
    } else {
        None
    }
}

/// Step 2: the platform `current_path` resolves to must be allowed.
pub fn check_platform(
    requirements: &RouteRequirements,
    current_path: &str,
    platforms: &PlatformResolver,
    redirects: &RedirectPaths,
) -> Option<Denial> {
    let allowed = requirements.platforms()?;
    let platform = platforms.resolve(current_path);
    if allowed.contains(&platform) {
        None
    } else {
        Some(Denial::new(
            DenialReason::PlatformNotSupported { platform },
            &redirects.platform_not_supported,
        ))
    }
}

/// Step 3: user must hold at least one required role.
pub fn check_roles(
    requirements: &RouteRequirements,
    user: Option<&UserProfile>,
    redirects: &RedirectPaths,
) -> Option<Denial> {
    let required = requirements.required_roles()?;
    if user.is_some_and(|u| u.has_any_role(required)) {
        None
    } else {
        Some(Denial::new(
            DenialReason::MissingRole {
                required: required.iter().cloned().collect(),
            },
            &redirects.unauthorized,
        ))
    }
}

/// Step 4: user must hold at least one required plan.
pub fn check_subscription(
    requirements: &RouteRequirements,
    user: Option<&UserProfile>,
    redirects: &RedirectPaths,
) -> Option<Denial> {
    let required = requirements.required_subscription()?;
    if user.is_some_and(|u| u.has_any_subscription(required)) {
        None
    } else {
        Some(Denial::new(
            DenialReason::MissingSubscription {
                required: required.iter().cloned().collect(),
            },
            &redirects.pricing,
        ))
    }
}

/// Step 6: beta routes need a beta tester.
pub fn check_beta(
    requirements: &RouteRequirements,
    user: Option<&UserProfile>,
    redirects: &RedirectPaths,
) -> Option<Denial> {
    if !requirements.requires_beta() || user.is_some_and(|u| u.has_beta_access) {
        None
    } else {
        Some(Denial::new(DenialReason::BetaRequired, &redirects.beta_required))
    }
}
