//! Effect traits through which the access layer reaches the outside world.
//!
//! The validator and dispatcher never talk to HTTP, timers or the router directly.
//! Production handlers live in `routeguard-effects`; deterministic mocks live in
//! `routeguard-testkit`.

pub mod lookup;
pub mod navigation;
pub mod time;

pub use lookup::{FeatureFlagEffects, LookupEffects, VersionEffects};
pub use navigation::NavigationEffects;
pub use time::PhysicalTimeEffects;
