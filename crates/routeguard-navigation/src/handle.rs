//! Caller-owned handle for an in-flight navigation.

use routeguard_core::{Result, RouteguardError};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// How a navigation call ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationOutcome {
    /// The requested path was reached.
    Arrived {
        /// Requested path.
        path: String,
        /// Attempts used, including the successful one.
        attempts: u32,
    },
    /// Every attempt failed; the fallback path was reached instead.
    FellBack {
        /// Fallback path that was reached.
        path: String,
        /// Path that could not be reached.
        from: String,
        /// Failed attempts at `from`.
        attempts: u32,
    },
    /// Cancelled or superseded before reaching any path.
    Cancelled,
}

impl NavigationOutcome {
    /// Path the router ended on, if any.
    pub fn landed_on(&self) -> Option<&str> {
        match self {
            NavigationOutcome::Arrived { path, .. } | NavigationOutcome::FellBack { path, .. } => {
                Some(path)
            }
            NavigationOutcome::Cancelled => None,
        }
    }
}

/// Handle to a navigation running in the background.
///
/// By default the navigation lives as long as its handle: dropping the handle (for
/// example when the page that started it unmounts) aborts pending retries. Use `detach`
/// to let it run unowned, or `run_to_completion` to keep a handle whose drop does not
/// abort.
#[derive(Debug)]
#[must_use = "dropping a NavigationHandle aborts the navigation"]
pub struct NavigationHandle {
    path: String,
    task: Option<JoinHandle<Result<NavigationOutcome>>>,
    abort_on_drop: bool,
}

impl NavigationHandle {
    pub(crate) fn new(path: String, task: JoinHandle<Result<NavigationOutcome>>) -> Self {
        Self {
            path,
            task: Some(task),
            abort_on_drop: true,
        }
    }

    /// Keep the navigation running when this handle is dropped.
    ///
    /// `cancel` still aborts it, and `outcome` still reports how it ended.
    pub fn run_to_completion(mut self) -> Self {
        self.abort_on_drop = false;
        self
    }

    /// Returns `true` if dropping this handle aborts the navigation.
    pub fn aborts_on_drop(&self) -> bool {
        self.abort_on_drop && self.task.is_some()
    }

    /// Path this navigation was asked to reach.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Abort the navigation if it has not finished.
    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Returns `true` once the navigation finished, was cancelled or was detached.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Release ownership; the navigation keeps running to completion.
    pub fn detach(mut self) {
        self.task.take();
    }

    /// Wait for the navigation to end.
    pub async fn outcome(mut self) -> Result<NavigationOutcome> {
        let Some(task) = self.task.as_mut() else {
            return Err(RouteguardError::internal("navigation handle has no task"));
        };
        let joined = task.await;
        self.task = None;

        match joined {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Ok(NavigationOutcome::Cancelled),
            Err(err) => Err(RouteguardError::internal(format!(
                "navigation task failed: {err}"
            ))),
        }
    }
}

impl Drop for NavigationHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            if self.abort_on_drop {
                task.abort();
            }
        }
    }
}
