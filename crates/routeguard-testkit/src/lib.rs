//! Routeguard testing infrastructure
//!
//! Mock effect handlers and session fixtures shared by the workspace's tests.
//!
//! ```toml
//! [dev-dependencies]
//! routeguard-testkit = { path = "../routeguard-testkit" }
//! ```

pub mod fixtures;
pub mod mock_effects;

pub use fixtures::*;
pub use mock_effects::{FrozenTime, InstantTime, MockLookups, NavigationCall, ScriptedNavigator};
