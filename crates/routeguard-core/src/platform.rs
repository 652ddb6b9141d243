//! Path → platform resolution.

use serde::{Deserialize, Serialize};

use crate::types::Platform;

/// One prefix rule of the platform table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRule {
    /// Path prefix, matched on segment boundaries.
    pub prefix: String,
    /// Platform served under that prefix.
    pub platform: Platform,
}

impl PlatformRule {
    /// Create a rule.
    pub fn new(prefix: impl Into<String>, platform: Platform) -> Self {
        Self {
            prefix: prefix.into(),
            platform,
        }
    }
}

/// Resolves the platform a path belongs to.
///
/// The longest matching prefix wins; paths no rule matches belong to
/// `default_platform`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformResolver {
    /// Prefix rules.
    #[serde(default)]
    pub rules: Vec<PlatformRule>,
    /// Platform for unmatched paths.
    #[serde(default)]
    pub default_platform: Platform,
}

impl Default for PlatformResolver {
    fn default() -> Self {
        Self {
            rules: vec![
                PlatformRule::new("/tools", Platform::WebTool),
                PlatformRule::new("/desktop", Platform::Desktop),
                PlatformRule::new("/mobile", Platform::Mobile),
                PlatformRule::new("/extension", Platform::Extension),
            ],
            default_platform: Platform::WebApp,
        }
    }
}

impl PlatformResolver {
    /// Resolve the platform for `path`. Query string and fragment are ignored.
    pub fn resolve(&self, path: &str) -> Platform {
        let path = strip_query(path);
        self.rules
            .iter()
            .filter(|rule| prefix_matches(&rule.prefix, path))
            .max_by_key(|rule| rule.prefix.len())
            .map(|rule| rule.platform)
            .unwrap_or(self.default_platform)
    }
}

/// Path without its `?query` or `#fragment`.
pub fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Segment-aware prefix match: `/tools` matches `/tools` and `/tools/x`, not `/toolsets`.
pub fn prefix_matches(prefix: &str, path: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
