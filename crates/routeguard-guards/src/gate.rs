//! Access gate: `Pending → {Allowed, Denied}` for one route at one location.
//!
//! The gate evaluates once the session has resolved and caches the decision for that
//! identity. Observing the same identity again is free; a different identity (sign-in,
//! sign-out, switched user, changed roles) evaluates again. Moving to another location
//! resets the gate to `Pending`.
//!
//! While the session is resolving an already-taken decision is kept, so a token refresh
//! does not flicker the page back to a loading state.

use routeguard_core::{LookupEffects, RouteRequirements, SessionIdentity, SessionState};
use tracing::debug;

use crate::decision::{AccessDecision, Denial};
use crate::validator::AccessValidator;

/// Decision state machine for one route.
#[derive(Debug, Clone)]
pub struct AccessGate {
    path: String,
    requirements: RouteRequirements,
    decision: AccessDecision,
    decided_for: Option<SessionIdentity>,
    redirect_claimed: bool,
    evaluations: u32,
}

impl AccessGate {
    /// Gate for `requirements` at `path`, starting in `Pending`.
    pub fn new(path: impl Into<String>, requirements: RouteRequirements) -> Self {
        Self {
            path: path.into(),
            requirements,
            decision: AccessDecision::Pending,
            decided_for: None,
            redirect_claimed: false,
            evaluations: 0,
        }
    }

    /// Current decision.
    pub fn state(&self) -> &AccessDecision {
        &self.decision
    }

    /// Location the gate guards.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Requirements the gate enforces.
    pub fn requirements(&self) -> &RouteRequirements {
        &self.requirements
    }

    /// Number of full evaluations run so far.
    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }

    /// Feed the latest session; evaluates only when a decision is due.
    pub async fn observe<L: LookupEffects>(
        &mut self,
        validator: &AccessValidator<L>,
        session: &SessionState,
    ) -> &AccessDecision {
        let Some(identity) = session.identity() else {
            if self.decision.is_pending() {
                // Resolves unrestricted routes immediately; everything else stays pending.
                self.decision = validator
                    .validate_access(&self.requirements, session, &self.path)
                    .await;
            }
            return &self.decision;
        };

        if self.decided_for.as_ref() == Some(&identity) {
            return &self.decision;
        }

        debug!(path = %self.path, "Evaluating route access");
        self.decision = validator
            .validate_access(&self.requirements, session, &self.path)
            .await;
        self.decided_for = Some(identity);
        self.redirect_claimed = false;
        self.evaluations += 1;
        &self.decision
    }

    /// Move the gate to a new location with its requirements; resets to `Pending`.
    ///
    /// Relocating to the same path with the same requirements keeps the decision.
    pub fn relocate(&mut self, path: impl Into<String>, requirements: RouteRequirements) {
        let path = path.into();
        if path == self.path && requirements == self.requirements {
            return;
        }
        self.path = path;
        self.requirements = requirements;
        self.reset();
    }

    /// Drop the decision and go back to `Pending`.
    pub fn reset(&mut self) {
        self.decision = AccessDecision::Pending;
        self.decided_for = None;
        self.redirect_claimed = false;
    }

    /// Hand out the current denial once, so a redirect is dispatched a single time per
    /// decision.
    pub fn claim_redirect(&mut self) -> Option<Denial> {
        if self.redirect_claimed {
            return None;
        }
        let denial = self.decision.denial()?.clone();
        self.redirect_claimed = true;
        Some(denial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeguard_core::{PermissionLevel, UserProfile};
    use routeguard_testkit::{plain_user, user_with_roles, MockLookups};

    fn validator(lookups: &MockLookups) -> AccessValidator<MockLookups> {
        AccessValidator::new(lookups.clone())
    }

    #[tokio::test]
    async fn waits_for_session_then_decides_once() {
        let lookups = MockLookups::with_version("2.0.0");
        let validator = validator(&lookups);
        let mut gate = AccessGate::new(
            "/labs",
            RouteRequirements::new(PermissionLevel::Authenticated).with_min_version("1.5"),
        );

        assert!(gate.observe(&validator, &SessionState::Resolving).await.is_pending());
        assert_eq!(lookups.version_calls(), 0);

        let session = plain_user("u1");
        assert!(gate.observe(&validator, &session).await.is_allowed());
        assert!(gate.observe(&validator, &session).await.is_allowed());
        assert!(gate.observe(&validator, &session).await.is_allowed());

        assert_eq!(gate.evaluations(), 1);
        assert_eq!(lookups.version_calls(), 1);
    }

    #[tokio::test]
    async fn identity_change_reevaluates() {
        let lookups = MockLookups::with_version("1.0");
        let validator = validator(&lookups);
        let mut gate = AccessGate::new("/admin", RouteRequirements::public().with_roles(["admin"]));

        assert!(gate
            .observe(&validator, &user_with_roles("u1", &["editor"]))
            .await
            .is_denied());
        assert!(gate
            .observe(&validator, &user_with_roles("u1", &["admin"]))
            .await
            .is_allowed());
        assert!(gate.observe(&validator, &SessionState::Anonymous).await.is_denied());
        assert_eq!(gate.evaluations(), 3);
    }

    #[tokio::test]
    async fn resolving_again_keeps_the_decision() {
        let lookups = MockLookups::with_version("1.0");
        let validator = validator(&lookups);
        let mut gate =
            AccessGate::new("/me", RouteRequirements::new(PermissionLevel::Authenticated));

        let session = SessionState::authenticated(UserProfile::new("u1"));
        assert!(gate.observe(&validator, &session).await.is_allowed());
        assert!(gate.observe(&validator, &SessionState::Resolving).await.is_allowed());
        assert!(gate.observe(&validator, &session).await.is_allowed());
        assert_eq!(gate.evaluations(), 1);
    }

    #[tokio::test]
    async fn relocation_resets_to_pending() {
        let lookups = MockLookups::with_version("1.0");
        let validator = validator(&lookups);
        let mut gate =
            AccessGate::new("/a", RouteRequirements::new(PermissionLevel::Authenticated));
        let session = plain_user("u1");

        gate.observe(&validator, &session).await;
        gate.relocate("/a", RouteRequirements::new(PermissionLevel::Authenticated));
        assert!(gate.state().is_allowed());

        gate.relocate("/b", RouteRequirements::new(PermissionLevel::Admin).with_roles(["admin"]));
        assert!(gate.state().is_pending());
        assert!(gate.observe(&validator, &session).await.is_denied());
        assert_eq!(gate.evaluations(), 2);
    }

    #[tokio::test]
    async fn redirect_is_claimed_once_per_decision() {
        let lookups = MockLookups::with_version("1.0");
        let validator = validator(&lookups);
        let mut gate =
            AccessGate::new("/me", RouteRequirements::new(PermissionLevel::Authenticated));

        assert!(gate.claim_redirect().is_none());
        gate.observe(&validator, &SessionState::Anonymous).await;
        assert_eq!(gate.claim_redirect().map(|d| d.redirect), Some("/login".to_string()));
        assert!(gate.claim_redirect().is_none());

        gate.reset();
        gate.observe(&validator, &SessionState::Anonymous).await;
        assert!(gate.claim_redirect().is_some());
    }
}
