//! Timer seam for retry backoff.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::Result;

/// Wall-clock sleeping, injectable so tests do not wait on real backoff delays.
#[async_trait]
pub trait PhysicalTimeEffects: Send + Sync {
    /// Suspend the caller for `duration`.
    async fn sleep(&self, duration: Duration) -> Result<()>;

    /// Suspend the caller for `ms` milliseconds.
    async fn sleep_ms(&self, ms: u64) -> Result<()> {
        self.sleep(Duration::from_millis(ms)).await
    }
}

#[async_trait]
impl<T: PhysicalTimeEffects + ?Sized> PhysicalTimeEffects for Arc<T> {
    async fn sleep(&self, duration: Duration) -> Result<()> {
        (**self).sleep(duration).await
    }
}
