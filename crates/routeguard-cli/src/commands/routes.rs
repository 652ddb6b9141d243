//! `routeguard routes`

use routeguard_core::{RouteRequirements, RouteguardConfig};
use std::fmt::Write;

/// One line per configured route: path, permission, then any further requirements.
pub fn render(config: &RouteguardConfig) -> String {
    let mut out = String::new();
    if config.routes.is_empty() {
        out.push_str("(no routes configured; every path is public)\n");
        return out;
    }

    let width = config
        .routes
        .iter()
        .map(|r| r.path.len())
        .max()
        .unwrap_or(0);
    for entry in &config.routes {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            entry.path,
            describe(&entry.requirements)
        );
    }
    out
}

fn describe(req: &RouteRequirements) -> String {
    let mut parts = vec![req.permission.to_string()];
    if let Some(platforms) = req.platforms() {
        let names: Vec<&str> = platforms.iter().map(|p| p.as_str()).collect();
        parts.push(format!("platform={}", names.join("|")));
    }
    if let Some(roles) = req.required_roles() {
        parts.push(format!("roles={}", join(roles)));
    }
    if let Some(plans) = req.required_subscription() {
        parts.push(format!("subscription={}", join(plans)));
    }
    if let Some(version) = req.required_min_version() {
        parts.push(format!("min_version={version}"));
    }
    if req.requires_beta() {
        parts.push("beta".to_string());
    }
    if let Some(features) = req.required_features() {
        parts.push(format!("features={}", join(features)));
    }
    parts.join(" ")
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("|")
}
