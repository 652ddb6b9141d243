//! Session fixtures.

use routeguard_core::{SessionState, UserProfile};

/// Signed-in user with `roles`.
pub fn user_with_roles(id: &str, roles: &[&str]) -> SessionState {
    SessionState::authenticated(UserProfile::new(id).with_roles(roles.iter().copied()))
}

/// Signed-in user holding `plans`.
pub fn subscriber(id: &str, plans: &[&str]) -> SessionState {
    SessionState::authenticated(UserProfile::new(id).with_subscription(plans.iter().copied()))
}

/// Signed-in beta tester.
pub fn beta_tester(id: &str) -> SessionState {
    SessionState::authenticated(UserProfile::new(id).with_beta_access(true))
}

/// Signed-in user with no roles, plans or beta access.
pub fn plain_user(id: &str) -> SessionState {
    SessionState::authenticated(UserProfile::new(id))
}

/// Signed-in user holding everything the fixtures know about.
pub fn superuser(id: &str) -> SessionState {
    SessionState::authenticated(
        UserProfile::new(id)
            .with_roles(["admin", "editor"])
            .with_subscription(["pro", "team"])
            .with_beta_access(true),
    )
}
