//! Tokio-backed timer for retry backoff.

use async_trait::async_trait;
use routeguard_core::{PhysicalTimeEffects, Result};
use std::time::Duration;

/// Sleeps on the tokio timer.
///
/// Dropping the future (for example when the navigation task is aborted) cancels the
/// sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimeHandler;

impl TokioTimeHandler {
    /// Create a new handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhysicalTimeEffects for TokioTimeHandler {
    async fn sleep(&self, duration: Duration) -> Result<()> {
        tokio::time::sleep(duration).await;
        Ok(())
    }
}
