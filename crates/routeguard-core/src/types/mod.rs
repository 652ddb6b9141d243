//! Domain types shared by the validator, the gate and the dispatcher.

pub mod access;
pub mod requirements;
pub mod route_state;
pub mod session;

pub use access::{PermissionLevel, Platform};
pub use requirements::RouteRequirements;
pub use route_state::{RouteState, NAVIGATION_FAILED};
pub use session::{SessionIdentity, SessionState, UserProfile};
