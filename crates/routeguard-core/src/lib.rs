//! # Routeguard Core
//!
//! Vocabulary shared by every Routeguard crate: route requirements, session views,
//! navigation state, effect traits, configuration and the unified error type.

pub mod backoff;
pub mod config;
pub mod effects;
pub mod errors;
pub mod platform;
pub mod types;
pub mod version;

pub use backoff::BackoffStrategy;
pub use config::{
    LookupConfig, LookupFailurePolicy, NavigationConfig, RedirectPaths, RouteEntry,
    RouteguardConfig,
};
pub use effects::{
    FeatureFlagEffects, LookupEffects, NavigationEffects, PhysicalTimeEffects, VersionEffects,
};
pub use errors::{Result, RouteguardError};
pub use platform::{PlatformResolver, PlatformRule};
pub use types::{
    PermissionLevel, Platform, RouteRequirements, RouteState, SessionIdentity, SessionState,
    UserProfile, NAVIGATION_FAILED,
};
pub use version::{compare_versions, satisfies_minimum};
