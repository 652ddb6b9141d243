//! # Routeguard Navigation
//!
//! Route changes with retry and fallback, a bounded history of visited paths, and
//! caller-owned handles that tie pending retries to the lifetime of whoever asked for
//! the navigation.

pub mod dispatcher;
pub mod handle;
pub mod history;
pub mod retry;

pub use dispatcher::{NavigateOptions, NavigationDispatcher};
pub use handle::{NavigationHandle, NavigationOutcome};
pub use history::{NavigationHistory, SharedHistory, DEFAULT_HISTORY_CAPACITY};
pub use retry::{BackoffStrategy, NavigationRetryPolicy};
