//! Router seam used by the dispatcher.

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::RouteState;
use crate::Result;

/// Performs a single route change.
///
/// An `Err` means the router did not change the visible route; the dispatcher may retry.
#[async_trait]
pub trait NavigationEffects: Send + Sync {
    /// Change the visible route to `path`, handing `state` to the destination.
    async fn navigate_to(&self, path: &str, state: &RouteState) -> Result<()>;
}

#[async_trait]
impl<T: NavigationEffects + ?Sized> NavigationEffects for Arc<T> {
    async fn navigate_to(&self, path: &str, state: &RouteState) -> Result<()> {
        (**self).navigate_to(path, state).await
    }
}
