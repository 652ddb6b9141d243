//! # Routeguard Effects
//!
//! Production handlers for the effect traits declared in `routeguard-core`:
//!
//! - `HttpVersionHandler` / `HttpFeatureFlagHandler`: remote lookups over reqwest
//! - `HttpLookups`: both lookups sharing one client
//! - `StaticLookups`: fixed answers, for offline checks
//! - `TokioTimeHandler`: backoff sleeps on the tokio timer
//!
//! Test doubles are not here; see `routeguard-testkit`.

pub mod http;
pub mod static_lookups;
pub mod time;

pub use http::{
    FeatureCheckRequest, FeatureCheckResponse, HttpFeatureFlagHandler, HttpLookups,
    HttpVersionHandler, VersionResponse,
};
pub use static_lookups::StaticLookups;
pub use time::TokioTimeHandler;
