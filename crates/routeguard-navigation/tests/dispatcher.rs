//! Dispatcher behaviour against scripted routers and timers.

use assert_matches::assert_matches;
use routeguard_core::{NavigationConfig, RouteState, RouteguardError, NAVIGATION_FAILED};
use routeguard_navigation::{
    BackoffStrategy, NavigateOptions, NavigationDispatcher, NavigationOutcome,
    NavigationRetryPolicy, SharedHistory,
};
use routeguard_testkit::{FrozenTime, InstantTime, ScriptedNavigator};
use std::time::Duration;

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn arrives_on_first_attempt() {
    let navigator = ScriptedNavigator::new();
    let dispatcher = NavigationDispatcher::new(navigator.clone(), InstantTime::new());

    let outcome = dispatcher
        .navigate("/focus", NavigateOptions::default())
        .outcome()
        .await
        .unwrap();

    assert_eq!(
        outcome,
        NavigationOutcome::Arrived {
            path: "/focus".into(),
            attempts: 1
        }
    );
    assert_eq!(navigator.arrivals(), vec!["/focus".to_string()]);
    assert_eq!(dispatcher.history().snapshot(), vec!["/focus".to_string()]);
    assert!(!dispatcher.has_pending());
}

#[tokio::test]
async fn retries_with_exponential_backoff_then_arrives() {
    let navigator = ScriptedNavigator::new().fail_times("/mood", 2);
    let time = InstantTime::new();
    let dispatcher = NavigationDispatcher::new(navigator.clone(), time.clone());

    let outcome = dispatcher
        .navigate_now("/mood", NavigateOptions::default())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        NavigationOutcome::Arrived {
            path: "/mood".into(),
            attempts: 3
        }
    );
    assert_eq!(time.sleeps(), vec![Duration::from_secs(2), Duration::from_secs(4)]);
    assert_eq!(navigator.attempts_for("/mood"), 3);
    assert_eq!(navigator.arrivals(), vec!["/mood".to_string()]);
}

#[tokio::test]
async fn exhausted_retries_fall_back_exactly_once() {
    let navigator = ScriptedNavigator::new().always_fail("/x");
    let time = InstantTime::new();
    let dispatcher = NavigationDispatcher::new(navigator.clone(), time.clone());

    let outcome = dispatcher
        .navigate("/x", NavigateOptions::default().max_retries(3))
        .outcome()
        .await
        .unwrap();

    assert_eq!(
        outcome,
        NavigationOutcome::FellBack {
            path: "/".into(),
            from: "/x".into(),
            attempts: 3
        }
    );
    assert_eq!(navigator.attempts_for("/x"), 3);
    assert_eq!(navigator.arrivals(), vec!["/".to_string()]);

    let fallback_call = navigator
        .calls()
        .into_iter()
        .find(|call| call.path == "/")
        .unwrap();
    assert_eq!(fallback_call.state.from.as_deref(), Some("/x"));
    assert_eq!(fallback_call.state.error.as_deref(), Some(NAVIGATION_FAILED));

    // Intent is recorded before the attempts, the fallback after them.
    assert_eq!(
        dispatcher.history().snapshot(),
        vec!["/x".to_string(), "/".to_string()]
    );
    assert_eq!(time.sleeps().len(), 2);
}

#[tokio::test]
async fn fallback_keeps_caller_state() {
    let navigator = ScriptedNavigator::new().always_fail("/journal");
    let dispatcher = NavigationDispatcher::new(navigator.clone(), InstantTime::new());
    let state = RouteState {
        return_to: Some("/journal".into()),
        ..RouteState::default()
    }
    .preserving_query();

    dispatcher
        .navigate_now("/journal", NavigateOptions::with_state(state).max_retries(1))
        .await
        .unwrap();

    let fallback_call = navigator
        .calls()
        .into_iter()
        .find(|call| call.path == "/")
        .unwrap();
    assert_eq!(fallback_call.state.from.as_deref(), Some("/journal"));
    assert_eq!(fallback_call.state.return_to.as_deref(), Some("/journal"));
    assert!(fallback_call.state.preserve_query);
    assert!(fallback_call.state.is_redirect);
    assert_eq!(fallback_call.state.error.as_deref(), Some(NAVIGATION_FAILED));
}

#[tokio::test]
async fn handle_kept_running_survives_drop() {
    let navigator = ScriptedNavigator::new();
    let dispatcher = NavigationDispatcher::new(navigator.clone(), InstantTime::new());

    let handle = dispatcher
        .navigate("/login", NavigateOptions::default())
        .run_to_completion();
    assert!(!handle.aborts_on_drop());
    drop(handle);
    settle().await;

    assert_eq!(navigator.arrivals(), vec!["/login".to_string()]);
    assert!(!dispatcher.has_pending());
}

#[tokio::test]
async fn per_call_fallback_and_budget() {
    let navigator = ScriptedNavigator::new().always_fail("/claims");
    let dispatcher = NavigationDispatcher::new(navigator.clone(), InstantTime::new());

    let outcome = dispatcher
        .navigate_now(
            "/claims",
            NavigateOptions::default().fallback("/dashboard").max_retries(1),
        )
        .await
        .unwrap();

    assert_matches!(
        outcome,
        NavigationOutcome::FellBack { ref path, attempts: 1, .. } if path == "/dashboard"
    );
    assert_eq!(navigator.attempts_for("/claims"), 1);
}

#[tokio::test]
async fn failing_fallback_is_an_error_not_a_retry() {
    let navigator = ScriptedNavigator::new().always_fail("/x").always_fail("/");
    let dispatcher = NavigationDispatcher::new(navigator.clone(), InstantTime::new());

    let err = dispatcher
        .navigate_now("/x", NavigateOptions::default())
        .await
        .unwrap_err();

    assert_matches!(err, RouteguardError::Navigation { ref path, .. } if path == "/");
    assert_eq!(navigator.attempts_for("/"), 1);
    assert!(navigator.arrivals().is_empty());
}

#[tokio::test]
async fn dropping_the_handle_cancels_pending_retries() {
    let navigator = ScriptedNavigator::new().always_fail("/x");
    let dispatcher = NavigationDispatcher::new(navigator.clone(), FrozenTime);

    let handle = dispatcher.navigate("/x", NavigateOptions::default());
    settle().await;
    assert_eq!(navigator.attempts_for("/x"), 1);

    drop(handle);
    settle().await;

    assert_eq!(navigator.attempts_for("/x"), 1);
    assert!(navigator.arrivals().is_empty());
}

#[tokio::test]
async fn explicit_cancel_reports_cancelled() {
    let navigator = ScriptedNavigator::new().always_fail("/x");
    let dispatcher = NavigationDispatcher::new(navigator.clone(), FrozenTime);

    let handle = dispatcher.navigate("/x", NavigateOptions::default());
    settle().await;
    handle.cancel();

    assert_eq!(handle.outcome().await.unwrap(), NavigationOutcome::Cancelled);
    assert!(navigator.arrivals().is_empty());
}

#[tokio::test]
async fn newer_navigation_supersedes_pending_one() {
    let navigator = ScriptedNavigator::new().always_fail("/x");
    let dispatcher = NavigationDispatcher::new(navigator.clone(), FrozenTime);

    let first = dispatcher.navigate("/x", NavigateOptions::default());
    settle().await;
    let second = dispatcher.navigate("/y", NavigateOptions::default());

    assert_eq!(second.outcome().await.unwrap().landed_on(), Some("/y"));
    assert_eq!(first.outcome().await.unwrap(), NavigationOutcome::Cancelled);
    assert_eq!(navigator.arrivals(), vec!["/y".to_string()]);
    assert!(!dispatcher.has_pending());
}

#[tokio::test]
async fn cancel_pending_through_the_dispatcher() {
    let navigator = ScriptedNavigator::new().always_fail("/x");
    let dispatcher = NavigationDispatcher::new(navigator.clone(), FrozenTime);

    let handle = dispatcher.navigate("/x", NavigateOptions::default());
    settle().await;

    assert!(dispatcher.cancel_pending());
    assert!(!dispatcher.cancel_pending());
    assert_eq!(handle.outcome().await.unwrap(), NavigationOutcome::Cancelled);
}

#[tokio::test]
async fn detached_navigation_runs_to_completion() {
    let navigator = ScriptedNavigator::new().fail_times("/sleep", 1);
    let dispatcher = NavigationDispatcher::new(navigator.clone(), InstantTime::new());

    dispatcher
        .navigate("/sleep", NavigateOptions::default())
        .detach();
    settle().await;

    assert_eq!(navigator.arrivals(), vec!["/sleep".to_string()]);
}

#[tokio::test]
async fn go_back_uses_previous_entry_or_fallback() {
    let navigator = ScriptedNavigator::new();
    let dispatcher = NavigationDispatcher::new(navigator.clone(), InstantTime::new());

    let first = dispatcher
        .go_back(NavigateOptions::default().fallback("/home"))
        .outcome()
        .await
        .unwrap();
    assert_eq!(first.landed_on(), Some("/home"));

    dispatcher.navigate_now("/a", NavigateOptions::default()).await.unwrap();
    dispatcher.navigate_now("/b", NavigateOptions::default()).await.unwrap();

    let back = dispatcher
        .go_back(NavigateOptions::with_state(RouteState::default()))
        .outcome()
        .await
        .unwrap();
    assert_eq!(back.landed_on(), Some("/a"));
}

#[tokio::test]
async fn built_from_config() {
    let config = NavigationConfig {
        max_retries: 3,
        backoff: BackoffStrategy::Linear,
        base_delay_ms: 5,
        max_delay_ms: 100,
        fallback_path: "/safe".into(),
        history_capacity: 2,
    };
    let navigator = ScriptedNavigator::new().always_fail("/x");
    let time = InstantTime::new();
    let dispatcher =
        NavigationDispatcher::from_config(navigator.clone(), time.clone(), &config).unwrap();

    dispatcher.navigate_now("/a", NavigateOptions::default()).await.unwrap();
    let outcome = dispatcher.navigate_now("/x", NavigateOptions::default()).await.unwrap();

    assert_eq!(outcome.landed_on(), Some("/safe"));
    assert_eq!(
        time.sleeps(),
        vec![Duration::from_millis(5), Duration::from_millis(10)]
    );
    assert_eq!(
        dispatcher.history().snapshot(),
        vec!["/x".to_string(), "/safe".to_string()]
    );
}

#[tokio::test]
async fn independent_dispatchers_share_an_injected_history() {
    let history = SharedHistory::with_capacity(10).unwrap();
    let a = NavigationDispatcher::with_parts(
        ScriptedNavigator::new(),
        InstantTime::new(),
        history.clone(),
        NavigationRetryPolicy::default(),
        "/",
    );
    let b = NavigationDispatcher::with_parts(
        ScriptedNavigator::new(),
        InstantTime::new(),
        history.clone(),
        NavigationRetryPolicy::default(),
        "/",
    );

    a.navigate_now("/one", NavigateOptions::default()).await.unwrap();
    b.navigate_now("/two", NavigateOptions::default()).await.unwrap();

    assert_eq!(history.previous().as_deref(), Some("/one"));
}
