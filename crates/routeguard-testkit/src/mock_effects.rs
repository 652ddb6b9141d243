//! Deterministic effect handlers for tests
//!
//! - `MockLookups`: scripted version and feature-flag answers, with call counters
//! - `ScriptedNavigator`: router that fails a configurable number of times per path
//! - `InstantTime`: records backoff sleeps and returns immediately

use async_trait::async_trait;
use parking_lot::Mutex;
use routeguard_core::{
    FeatureFlagEffects, NavigationEffects, PhysicalTimeEffects, Result, RouteState,
    RouteguardError, VersionEffects,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scripted version and feature-flag lookups.
#[derive(Debug, Clone)]
pub struct MockLookups {
    state: Arc<Mutex<LookupState>>,
    version_calls: Arc<AtomicUsize>,
    feature_calls: Arc<AtomicUsize>,
}

#[derive(Debug)]
struct LookupState {
    version: Option<String>,
    disabled: BTreeSet<String>,
    features_unavailable: bool,
}

impl MockLookups {
    /// Lookups reporting `version` with every feature enabled.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(LookupState {
                version: Some(version.into()),
                disabled: BTreeSet::new(),
                features_unavailable: false,
            })),
            version_calls: Arc::new(AtomicUsize::new(0)),
            feature_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Lookups where both endpoints fail with a network error.
    pub fn unavailable() -> Self {
        let mock = Self::with_version("0.0.0");
        {
            let mut state = mock.state.lock();
            state.version = None;
            state.features_unavailable = true;
        }
        mock
    }

    /// Mark features as disabled.
    pub fn disable<S: Into<String>>(self, features: impl IntoIterator<Item = S>) -> Self {
        self.state
            .lock()
            .disabled
            .extend(features.into_iter().map(Into::into));
        self
    }

    /// Change the reported version.
    pub fn set_version(&self, version: impl Into<String>) {
        self.state.lock().version = Some(version.into());
    }

    /// Make the version endpoint fail.
    pub fn fail_version(&self) {
        self.state.lock().version = None;
    }

    /// Make the feature endpoint fail (or recover).
    pub fn set_features_unavailable(&self, unavailable: bool) {
        self.state.lock().features_unavailable = unavailable;
    }

    /// Number of version lookups served.
    pub fn version_calls(&self) -> usize {
        self.version_calls.load(Ordering::SeqCst)
    }

    /// Number of feature lookups served.
    pub fn feature_calls(&self) -> usize {
        self.feature_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionEffects for MockLookups {
    async fn app_version(&self) -> Result<String> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .version
            .clone()
            .ok_or_else(|| RouteguardError::network("version endpoint unreachable"))
    }
}

#[async_trait]
impl FeatureFlagEffects for MockLookups {
    async fn disabled_features(&self, features: &[String]) -> Result<Vec<String>> {
        self.feature_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        if state.features_unavailable {
            return Err(RouteguardError::network("feature endpoint unreachable"));
        }
        Ok(features
            .iter()
            .filter(|f| state.disabled.contains(*f))
            .cloned()
            .collect())
    }
}

/// One call received by the `ScriptedNavigator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCall {
    /// Requested path.
    pub path: String,
    /// State handed to the router.
    pub state: RouteState,
    /// Whether the router accepted it.
    pub succeeded: bool,
}

/// Router that fails a scripted number of times per path.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNavigator {
    inner: Arc<Mutex<NavigatorState>>,
}

#[derive(Debug, Default)]
struct NavigatorState {
    failures_left: HashMap<String, u32>,
    always_fail: BTreeSet<String>,
    calls: Vec<NavigationCall>,
}

impl ScriptedNavigator {
    /// Router that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `times` navigations to `path`.
    pub fn fail_times(self, path: impl Into<String>, times: u32) -> Self {
        self.inner.lock().failures_left.insert(path.into(), times);
        self
    }

    /// Fail every navigation to `path`.
    pub fn always_fail(self, path: impl Into<String>) -> Self {
        self.inner.lock().always_fail.insert(path.into());
        self
    }

    /// Every call received, in order.
    pub fn calls(&self) -> Vec<NavigationCall> {
        self.inner.lock().calls.clone()
    }

    /// Paths the router actually moved to, in order.
    pub fn arrivals(&self) -> Vec<String> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| c.succeeded)
            .map(|c| c.path.clone())
            .collect()
    }

    /// Number of calls for `path`, successful or not.
    pub fn attempts_for(&self, path: &str) -> usize {
        self.inner.lock().calls.iter().filter(|c| c.path == path).count()
    }
}

#[async_trait]
impl NavigationEffects for ScriptedNavigator {
    async fn navigate_to(&self, path: &str, state: &RouteState) -> Result<()> {
        let mut inner = self.inner.lock();
        let fail = if inner.always_fail.contains(path) {
            true
        } else {
            match inner.failures_left.get_mut(path) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    true
                }
                _ => false,
            }
        };

        inner.calls.push(NavigationCall {
            path: path.to_string(),
            state: state.clone(),
            succeeded: !fail,
        });

        if fail {
            Err(RouteguardError::navigation(path, "scripted failure"))
        } else {
            Ok(())
        }
    }
}

/// Timer that records requested delays and returns at once.
#[derive(Debug, Clone, Default)]
pub struct InstantTime {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl InstantTime {
    /// Create a recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

#[async_trait]
impl PhysicalTimeEffects for InstantTime {
    async fn sleep(&self, duration: Duration) -> Result<()> {
        self.sleeps.lock().push(duration);
        tokio::task::yield_now().await;
        Ok(())
    }
}

/// Timer that never wakes; keeps a retry parked so cancellation can be observed.
#[derive(Debug, Clone, Default)]
pub struct FrozenTime;

#[async_trait]
impl PhysicalTimeEffects for FrozenTime {
    async fn sleep(&self, _duration: Duration) -> Result<()> {
        std::future::pending::<()>().await;
        Ok(())
    }
}
