//! Coarse access vocabulary: permission tiers and client platforms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::RouteguardError;

/// Coarse access tier required to view a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Anyone, signed in or not.
    #[default]
    Public,
    /// Any signed-in user.
    Authenticated,
    /// Signed-in user on a paid tier.
    Premium,
    /// Signed-in administrator.
    Admin,
}

impl PermissionLevel {
    /// Returns `true` when the tier needs a signed-in session.
    pub fn requires_authentication(&self) -> bool {
        !matches!(self, PermissionLevel::Public)
    }

    /// Wire name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::Public => "public",
            PermissionLevel::Authenticated => "authenticated",
            PermissionLevel::Premium => "premium",
            PermissionLevel::Admin => "admin",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = RouteguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(PermissionLevel::Public),
            "authenticated" => Ok(PermissionLevel::Authenticated),
            "premium" => Ok(PermissionLevel::Premium),
            "admin" => Ok(PermissionLevel::Admin),
            other => Err(RouteguardError::invalid(format!(
                "unknown permission level: {other}"
            ))),
        }
    }
}

/// Logical client surface a route may be restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// The main web application.
    #[default]
    WebApp,
    /// Standalone web tools.
    WebTool,
    /// Desktop shell.
    Desktop,
    /// Mobile shell.
    Mobile,
    /// Browser extension.
    Extension,
}

impl Platform {
    /// Wire name of the platform tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::WebApp => "web-app",
            Platform::WebTool => "web-tool",
            Platform::Desktop => "desktop",
            Platform::Mobile => "mobile",
            Platform::Extension => "extension",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = RouteguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web-app" => Ok(Platform::WebApp),
            "web-tool" => Ok(Platform::WebTool),
            "desktop" => Ok(Platform::Desktop),
            "mobile" => Ok(Platform::Mobile),
            "extension" => Ok(Platform::Extension),
            other => Err(RouteguardError::invalid(format!("unknown platform: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_levels_parse_and_print() {
        for level in [
            PermissionLevel::Public,
            PermissionLevel::Authenticated,
            PermissionLevel::Premium,
            PermissionLevel::Admin,
        ] {
            assert_eq!(level.as_str().parse::<PermissionLevel>().unwrap(), level);
        }
        assert!("root".parse::<PermissionLevel>().is_err());
    }

    #[test]
    fn only_public_skips_authentication() {
        assert!(!PermissionLevel::Public.requires_authentication());
        assert!(PermissionLevel::Premium.requires_authentication());
    }

    #[test]
    fn platform_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Platform::WebTool).unwrap();
        assert_eq!(json, "\"web-tool\"");
        let parsed: Platform = serde_json::from_str("\"extension\"").unwrap();
        assert_eq!(parsed, Platform::Extension);
    }
}
