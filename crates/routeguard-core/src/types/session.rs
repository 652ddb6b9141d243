//! Read-only view of the identity provider's session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Signed-in user as exposed by the identity provider's custom metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-assigned user id.
    pub id: String,
    /// Role names.
    #[serde(default)]
    pub roles: BTreeSet<String>,
    /// Subscription plan tags.
    #[serde(default)]
    pub subscription: BTreeSet<String>,
    /// Whether the user is enrolled in the beta program.
    #[serde(default, alias = "hasBetaAccess")]
    pub has_beta_access: bool,
}

impl UserProfile {
    /// User with no roles, plans or beta access.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Add roles.
    pub fn with_roles<S: Into<String>>(mut self, roles: impl IntoIterator<Item = S>) -> Self {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Add subscription plans.
    pub fn with_subscription<S: Into<String>>(
        mut self,
        plans: impl IntoIterator<Item = S>,
    ) -> Self {
        self.subscription.extend(plans.into_iter().map(Into::into));
        self
    }

    /// Set beta enrollment.
    pub fn with_beta_access(mut self, enabled: bool) -> Self {
        self.has_beta_access = enabled;
        self
    }

    /// Returns `true` if the user holds any role in `required`.
    pub fn has_any_role(&self, required: &BTreeSet<String>) -> bool {
        !self.roles.is_disjoint(required)
    }

    /// Returns `true` if the user holds any plan in `required`.
    pub fn has_any_subscription(&self, required: &BTreeSet<String>) -> bool {
        !self.subscription.is_disjoint(required)
    }
}

/// Session as seen by the access layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "user", rename_all = "lowercase")]
pub enum SessionState {
    /// Identity check still in flight; decisions must be deferred.
    #[default]
    Resolving,
    /// Resolved, nobody signed in.
    Anonymous,
    /// Resolved, signed-in user.
    Authenticated(UserProfile),
}

impl SessionState {
    /// Session for a signed-in user.
    pub fn authenticated(user: UserProfile) -> Self {
        Self::Authenticated(user)
    }

    /// Returns `true` once the identity provider has answered.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Resolving)
    }

    /// Returns `true` for a signed-in session.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Signed-in user, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Stable identity key for detecting sign-in, sign-out or user switches.
    ///
    /// `None` while resolving.
    pub fn identity(&self) -> Option<SessionIdentity> {
        match self {
            SessionState::Resolving => None,
            SessionState::Anonymous => Some(SessionIdentity::Anonymous),
            SessionState::Authenticated(user) => Some(SessionIdentity::User(user.clone())),
        }
    }
}

/// Identity a decision was made for.
///
/// Carries the whole profile so a role or plan change for the same user also counts as
/// a new identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIdentity {
    /// Nobody signed in.
    Anonymous,
    /// Signed-in user snapshot.
    User(UserProfile),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_intersection() {
        let user = UserProfile::new("u1").with_roles(["editor", "viewer"]);
        let admin: BTreeSet<String> = ["admin".to_string()].into_iter().collect();
        let editor: BTreeSet<String> = ["editor".to_string()].into_iter().collect();
        assert!(!user.has_any_role(&admin));
        assert!(user.has_any_role(&editor));
    }

    #[test]
    fn session_json_shape() {
        let json = r#"{"status":"authenticated",
            "user":{"id":"u1","roles":["admin"],"hasBetaAccess":true}}"#;
        let session: SessionState = serde_json::from_str(json).unwrap();
        let user = session.user().unwrap();
        assert!(user.has_beta_access);
        assert!(user.subscription.is_empty());

        let anon: SessionState = serde_json::from_str(r#"{"status":"anonymous"}"#).unwrap();
        assert_eq!(anon, SessionState::Anonymous);
        assert!(anon.is_resolved());
        assert!(SessionState::Resolving.identity().is_none());
    }
}
