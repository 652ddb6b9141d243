//! `routeguard check`

use routeguard_core::{RouteRequirements, RouteguardConfig, SessionState};
use routeguard_effects::StaticLookups;
use routeguard_guards::{AccessDecision, AccessValidator, RouteTable};
use serde::Serialize;

/// JSON printed by `check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path that was evaluated.
    pub path: String,
    /// Route table entry governing the path, if any.
    pub route: Option<String>,
    /// Requirements that were enforced.
    pub requirements: RouteRequirements,
    /// Outcome.
    #[serde(flatten)]
    pub decision: AccessDecision,
}

/// Evaluate `path` for `session` against the configured route table.
pub async fn run(
    config: &RouteguardConfig,
    path: &str,
    session: &SessionState,
    app_version: Option<String>,
    disabled: Vec<String>,
) -> CheckReport {
    let mut lookups = StaticLookups::new().with_disabled(disabled);
    if let Some(version) = app_version {
        lookups = lookups.with_version(version);
    }

    let table = RouteTable::from_entries(config.routes.iter().cloned());
    let route = table.lookup(path).map(|entry| entry.path.clone());
    let requirements = table.requirements_for(path);

    let validator = AccessValidator::from_config(lookups, config);
    let decision = validator.validate_access(&requirements, session, path).await;
    tracing::debug!(path, ?route, "Check finished");

    CheckReport {
        path: path.to_string(),
        route,
        requirements,
        decision,
    }
}
