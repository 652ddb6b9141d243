//! Transient payload handed to the destination route.

use serde::{Deserialize, Serialize};

/// Message attached when the dispatcher gives up and lands on the fallback path.
pub const NAVIGATION_FAILED: &str = "Navigation failed";

/// Navigation payload, created per navigation and consumed by the target route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteState {
    /// Path the navigation started from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Path to return to after the target route is done (login, upsell, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
    /// Set when the navigation was triggered by a guard rather than the user.
    #[serde(default)]
    pub is_redirect: bool,
    /// Whether the target should keep the current query string.
    #[serde(default)]
    pub preserve_query: bool,
    /// Diagnostic attached by a failed navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteState {
    /// State for a guard-triggered redirect away from `from`.
    pub fn redirect_from(from: impl Into<String>) -> Self {
        let from = from.into();
        Self {
            return_to: Some(from.clone()),
            from: Some(from),
            is_redirect: true,
            ..Self::default()
        }
    }

    /// State carried to the fallback path after `from` could not be reached.
    pub fn navigation_failed(from: impl Into<String>) -> Self {
        Self::default().failed_from(from)
    }

    /// This state with the failure of `from` recorded on it; other fields are kept.
    pub fn failed_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self.is_redirect = true;
        self.error = Some(NAVIGATION_FAILED.to_string());
        self
    }

    /// Keep the current query string on the target.
    pub fn preserving_query(mut self) -> Self {
        self.preserve_query = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_state_returns_to_origin() {
        let state = RouteState::redirect_from("/journal");
        assert_eq!(state.from.as_deref(), Some("/journal"));
        assert_eq!(state.return_to.as_deref(), Some("/journal"));
        assert!(state.is_redirect);
        assert!(state.error.is_none());
    }

    #[test]
    fn failure_keeps_caller_fields() {
        let state = RouteState {
            return_to: Some("/journal".into()),
            ..RouteState::default()
        }
        .preserving_query()
        .failed_from("/x");

        assert_eq!(state.from.as_deref(), Some("/x"));
        assert_eq!(state.return_to.as_deref(), Some("/journal"));
        assert!(state.preserve_query);
        assert!(state.is_redirect);
        assert_eq!(state.error.as_deref(), Some(NAVIGATION_FAILED));
    }

    #[test]
    fn failure_state_serializes_camel_case() {
        let json = serde_json::to_value(RouteState::navigation_failed("/x")).unwrap();
        assert_eq!(json["from"], "/x");
        assert_eq!(json["error"], NAVIGATION_FAILED);
        assert_eq!(json["isRedirect"], true);
        assert!(json.get("returnTo").is_none());
    }
}
