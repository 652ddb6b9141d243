//! Route enforcer: turns gate denials into redirects.
//!
//! ```text
//! session → AccessGate → AccessValidator → (Denied) → NavigationDispatcher → history
//! ```

use routeguard_core::{
    LookupEffects, NavigationEffects, PhysicalTimeEffects, RouteState, SessionState,
};
use routeguard_navigation::{NavigateOptions, NavigationDispatcher, NavigationHandle};
use tracing::info;

use crate::decision::{AccessDecision, Denial};
use crate::gate::AccessGate;
use crate::validator::AccessValidator;

/// What `enforce` did.
#[derive(Debug)]
#[must_use]
pub enum Enforcement {
    /// Session still resolving; nothing rendered, nothing dispatched.
    Pending,
    /// Access granted.
    Allowed,
    /// Access denied and a redirect was dispatched.
    Redirected {
        /// Failed check.
        denial: Denial,
        /// Handle to the redirect. Dropping it leaves the redirect running; use
        /// `cancel` to stop it.
        handle: NavigationHandle,
    },
    /// Access denied; the redirect was already dispatched by an earlier call.
    Denied(Denial),
}

impl Enforcement {
    /// Returns `true` if the route may render.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Enforcement::Allowed)
    }
}

/// Couples a validator with a dispatcher.
#[derive(Debug)]
pub struct RouteEnforcer<L, N, T> {
    validator: AccessValidator<L>,
    dispatcher: NavigationDispatcher<N, T>,
}

impl<L, N, T> RouteEnforcer<L, N, T>
where
    L: LookupEffects,
    N: NavigationEffects + 'static,
    T: PhysicalTimeEffects + 'static,
{
    /// Create an enforcer.
    pub fn new(validator: AccessValidator<L>, dispatcher: NavigationDispatcher<N, T>) -> Self {
        Self {
            validator,
            dispatcher,
        }
    }

    /// Validator in use.
    pub fn validator(&self) -> &AccessValidator<L> {
        &self.validator
    }

    /// Dispatcher in use.
    pub fn dispatcher(&self) -> &NavigationDispatcher<N, T> {
        &self.dispatcher
    }

    /// Observe `session` through `gate` and redirect on a fresh denial.
    ///
    /// The redirect carries `from`/`return_to` set to the guarded path so the target can
    /// send the user back afterwards. The gate hands out each denial once, so the
    /// redirect runs to completion even if the returned `Enforcement` is dropped.
    pub async fn enforce(&self, gate: &mut AccessGate, session: &SessionState) -> Enforcement {
        match gate.observe(&self.validator, session).await {
            AccessDecision::Pending => return Enforcement::Pending,
            AccessDecision::Allowed => return Enforcement::Allowed,
            AccessDecision::Denied(_) => {}
        }

        let Some(denial) = gate.claim_redirect() else {
            return match gate.state().denial() {
                Some(denial) => Enforcement::Denied(denial.clone()),
                None => Enforcement::Pending,
            };
        };

        info!(
            from = gate.path(),
            to = %denial.redirect,
            reason = %denial.reason,
            "Redirecting away from guarded route"
        );
        let state = RouteState::redirect_from(gate.path());
        let handle = self
            .dispatcher
            .navigate(denial.redirect.clone(), NavigateOptions::with_state(state))
            .run_to_completion();

        Enforcement::Redirected { denial, handle }
    }
}
