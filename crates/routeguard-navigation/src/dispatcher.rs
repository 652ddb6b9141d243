//! Navigation dispatcher
//!
//! Performs route changes through `NavigationEffects`, retrying failed attempts with
//! backoff and landing on a fallback path once the attempt budget is spent.
//!
//! # Guarantees
//!
//! - The requested path is recorded in history before the first attempt, so a failed
//!   navigation still shows the user's intent.
//! - A call that is not cancelled performs exactly one terminal navigation: the requested
//!   path or the fallback, never both.
//! - At most one background navigation is pending per dispatcher; a newer `navigate`
//!   aborts the older one's remaining retries.

use parking_lot::Mutex;
use routeguard_core::{
    NavigationConfig, NavigationEffects, PhysicalTimeEffects, Result, RouteState,
    RouteguardError,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

use crate::handle::{NavigationHandle, NavigationOutcome};
use crate::history::SharedHistory;
use crate::retry::NavigationRetryPolicy;

/// Per-call overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// State handed to the destination.
    pub state: RouteState,
    /// Fallback path for this call; defaults to the dispatcher's.
    pub fallback_path: Option<String>,
    /// Attempt budget for this call; defaults to the policy's.
    pub max_retries: Option<u32>,
}

impl NavigateOptions {
    /// Options carrying `state`.
    pub fn with_state(state: RouteState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Override the fallback path.
    pub fn fallback(mut self, path: impl Into<String>) -> Self {
        self.fallback_path = Some(path.into());
        self
    }

    /// Override the attempt budget.
    pub fn max_retries(mut self, attempts: u32) -> Self {
        self.max_retries = Some(attempts);
        self
    }
}

struct DispatcherInner<N, T> {
    navigator: N,
    time: T,
    history: SharedHistory,
    policy: NavigationRetryPolicy,
    fallback_path: String,
    pending: Mutex<Option<(u64, AbortHandle)>>,
    next_id: AtomicU64,
}

/// Dispatches navigations with retry, fallback and history recording.
pub struct NavigationDispatcher<N, T> {
    inner: Arc<DispatcherInner<N, T>>,
}

impl<N, T> Clone for NavigationDispatcher<N, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N, T> std::fmt::Debug for NavigationDispatcher<N, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationDispatcher")
            .field("policy", &self.inner.policy)
            .field("fallback_path", &self.inner.fallback_path)
            .field("history_len", &self.inner.history.len())
            .finish()
    }
}

impl<N, T> NavigationDispatcher<N, T>
where
    N: NavigationEffects + 'static,
    T: PhysicalTimeEffects + 'static,
{
    /// Create a dispatcher with the default policy, fallback `/` and a fresh history.
    pub fn new(navigator: N, time: T) -> Self {
        Self::with_parts(
            navigator,
            time,
            SharedHistory::default(),
            NavigationRetryPolicy::default(),
            "/",
        )
    }

    /// Create a dispatcher from the `[navigation]` config section.
    pub fn from_config(navigator: N, time: T, config: &NavigationConfig) -> Result<Self> {
        let history = SharedHistory::with_capacity(config.history_capacity)?;
        Ok(Self::with_parts(
            navigator,
            time,
            history,
            NavigationRetryPolicy::from_config(config),
            config.fallback_path.clone(),
        ))
    }

    /// Create a dispatcher from explicit parts.
    pub fn with_parts(
        navigator: N,
        time: T,
        history: SharedHistory,
        policy: NavigationRetryPolicy,
        fallback_path: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                navigator,
                time,
                history,
                policy,
                fallback_path: fallback_path.into(),
                pending: Mutex::new(None),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// History this dispatcher records into.
    pub fn history(&self) -> SharedHistory {
        self.inner.history.clone()
    }

    /// Retry policy in effect.
    pub fn policy(&self) -> &NavigationRetryPolicy {
        &self.inner.policy
    }

    /// Default fallback path.
    pub fn fallback_path(&self) -> &str {
        &self.inner.fallback_path
    }

    /// Start navigating to `path` in the background.
    ///
    /// Must be called inside a tokio runtime. Aborts any navigation this dispatcher
    /// still has pending.
    pub fn navigate(&self, path: impl Into<String>, options: NavigateOptions) -> NavigationHandle {
        let path = path.into();
        self.inner.history.push(path.clone());

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let inner = Arc::clone(&self.inner);
        let task_path = path.clone();

        // Hold the slot while spawning so a fast task cannot clear it before it is set.
        let mut pending = self.inner.pending.lock();
        if let Some((previous, abort)) = pending.take() {
            debug!(superseded = previous, by = id, "Aborting superseded navigation");
            abort.abort();
        }

        let task = tokio::spawn(async move {
            let result = inner.drive(&task_path, options).await;
            let mut pending = inner.pending.lock();
            if matches!(pending.as_ref(), Some((current, _)) if *current == id) {
                *pending = None;
            }
            result
        });
        *pending = Some((id, task.abort_handle()));
        drop(pending);

        NavigationHandle::new(path, task)
    }

    /// Navigate to `path` inline, without spawning.
    ///
    /// Cancelling is done by dropping the returned future.
    pub async fn navigate_now(
        &self,
        path: impl Into<String>,
        options: NavigateOptions,
    ) -> Result<NavigationOutcome> {
        let path = path.into();
        self.inner.history.push(path.clone());
        self.inner.drive(&path, options).await
    }

    /// Navigate to the entry before the current one, or to the fallback if there is none.
    pub fn go_back(&self, options: NavigateOptions) -> NavigationHandle {
        let target = self.inner.history.previous().unwrap_or_else(|| {
            options
                .fallback_path
                .clone()
                .unwrap_or_else(|| self.inner.fallback_path.clone())
        });
        debug!(target = %target, "Navigating back");
        self.navigate(target, options)
    }

    /// Abort the pending background navigation, if any.
    pub fn cancel_pending(&self) -> bool {
        match self.inner.pending.lock().take() {
            Some((id, abort)) => {
                debug!(navigation = id, "Cancelling pending navigation");
                abort.abort();
                true
            }
            None => false,
        }
    }

    /// Returns `true` while a background navigation is in flight.
    pub fn has_pending(&self) -> bool {
        self.inner.pending.lock().is_some()
    }
}

impl<N, T> DispatcherInner<N, T>
where
    N: NavigationEffects,
    T: PhysicalTimeEffects,
{
    async fn drive(&self, path: &str, options: NavigateOptions) -> Result<NavigationOutcome> {
        let NavigateOptions {
            state,
            fallback_path,
            max_retries,
        } = options;
        let policy = match max_retries {
            Some(attempts) => self.policy.clone().with_max_attempts(attempts),
            None => self.policy.clone(),
        };
        let mut attempt = 1;

        loop {
            match self.navigator.navigate_to(path, &state).await {
                Ok(()) => {
                    info!(path, attempts = attempt, "Navigation completed");
                    return Ok(NavigationOutcome::Arrived {
                        path: path.to_string(),
                        attempts: attempt,
                    });
                }
                Err(err) if policy.should_retry(attempt) => {
                    let delay = policy.delay_after(attempt);
                    warn!(
                        path,
                        attempt,
                        max_attempts = policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Navigation failed, retrying"
                    );
                    if let Err(sleep_err) = self.time.sleep(delay).await {
                        warn!(path, error = %sleep_err, "Backoff timer failed, giving up early");
                        break;
                    }
                    attempt += 1;
                }
                Err(err) => {
                    warn!(path, attempts = attempt, error = %err, "Navigation attempts exhausted");
                    break;
                }
            }
        }

        let fallback = fallback_path.unwrap_or_else(|| self.fallback_path.clone());
        self.history.push(fallback.clone());
        let failure_state = state.failed_from(path);

        self.navigator
            .navigate_to(&fallback, &failure_state)
            .await
            .map_err(|err| {
                error!(
                    from = path,
                    fallback = %fallback,
                    error = %err,
                    "Fallback navigation failed"
                );
                RouteguardError::navigation(fallback.clone(), err.to_string())
            })?;

        info!(from = path, fallback = %fallback, attempts = attempt, "Navigated to fallback");
        Ok(NavigationOutcome::FellBack {
            path: fallback,
            from: path.to_string(),
            attempts: attempt,
        })
    }
}
