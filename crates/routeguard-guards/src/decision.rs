//! Guard decision vocabulary
//!
//! A denial is an ordinary value carrying the reason and the path to redirect to. Only
//! `AccessDecision::Pending` is special: it means the session has not resolved yet and no
//! decision may be taken.

use routeguard_core::Platform;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote lookup a check depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupCheck {
    /// `GET /api/version`
    Version,
    /// `POST /api/features/check`
    Features,
}

impl fmt::Display for LookupCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupCheck::Version => write!(f, "version"),
            LookupCheck::Features => write!(f, "feature flags"),
        }
    }
}

/// Structured reason for a denial, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DenialReason {
    /// Protected route, nobody signed in.
    Unauthenticated,
    /// Route not offered on the platform the path resolved to.
    PlatformNotSupported { platform: Platform },
    /// User holds none of the required roles.
    MissingRole { required: Vec<String> },
    /// User holds none of the required plans.
    MissingSubscription { required: Vec<String> },
    /// Running application is older than the route's minimum.
    UpdateRequired { running: String, minimum: String },
    /// Route limited to beta testers.
    BetaRequired,
    /// Some required feature flags are off.
    FeatureDisabled { features: Vec<String> },
    /// A remote lookup failed under the fail-closed policy.
    LookupUnavailable { check: LookupCheck, message: String },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::Unauthenticated => write!(f, "Authentication required"),
            DenialReason::PlatformNotSupported { platform } => {
                write!(f, "Route not available on {platform}")
            }
            DenialReason::MissingRole { required } => {
                write!(f, "Missing role: one of {}", required.join(", "))
            }
            DenialReason::MissingSubscription { required } => {
                write!(f, "Missing subscription: one of {}", required.join(", "))
            }
            DenialReason::UpdateRequired { running, minimum } => {
                write!(f, "Update required: running {running}, need {minimum}")
            }
            DenialReason::BetaRequired => write!(f, "Beta access required"),
            DenialReason::FeatureDisabled { features } => {
                write!(f, "Feature disabled: {}", features.join(", "))
            }
            DenialReason::LookupUnavailable { check, message } => {
                write!(f, "Could not verify {check}: {message}")
            }
        }
    }
}

/// A failed check and where it sends the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    /// Why access was denied.
    pub reason: DenialReason,
    /// Path to redirect to.
    pub redirect: String,
}

impl Denial {
    /// Create a denial.
    pub fn new(reason: DenialReason, redirect: impl Into<String>) -> Self {
        Self {
            reason,
            redirect: redirect.into(),
        }
    }
}

/// Outcome of validating a route against a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum AccessDecision {
    /// Session not resolved yet; decide later.
    #[default]
    Pending,
    /// Every check passed.
    Allowed,
    /// First failing check.
    Denied(Denial),
}

impl AccessDecision {
    /// Deny with `reason`, redirecting to `redirect`.
    pub fn deny(reason: DenialReason, redirect: impl Into<String>) -> Self {
        Self::Denied(Denial::new(reason, redirect))
    }

    /// Returns `true` if every check passed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns `true` while the decision is deferred.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` if a check failed.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }

    /// Where to redirect; `None` when allowed or pending.
    pub fn redirect_path(&self) -> Option<&str> {
        self.denial().map(|d| d.redirect.as_str())
    }

    /// The denial, if denied.
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Denied(denial) => Some(denial),
            _ => None,
        }
    }
}

impl From<Option<Denial>> for AccessDecision {
    fn from(denial: Option<Denial>) -> Self {
        denial.map_or(AccessDecision::Allowed, AccessDecision::Denied)
    }
}
