//! Routeguard guards prelude.
//!
//! Curated re-exports for wiring a guarded route without naming every crate.

pub use crate::{
    AccessDecision, AccessGate, AccessValidator, Denial, DenialReason, Enforcement,
    RouteEnforcer, RouteTable,
};
pub use routeguard_core::{
    LookupFailurePolicy, PermissionLevel, Platform, RouteRequirements, RouteState,
    RouteguardConfig, SessionState, UserProfile,
};
pub use routeguard_navigation::{NavigateOptions, NavigationDispatcher, NavigationOutcome};
