//! Unified error type for Routeguard
//!
//! A policy denial is not an error: it is an `AccessDecision::Denied` value. The variants
//! here cover configuration problems, failed lookups and navigations that could not land
//! anywhere.

use serde::{Deserialize, Serialize};

/// Unified error type for all Routeguard operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RouteguardError {
    /// Invalid input or configuration value
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Configuration could not be read or parsed
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration failure
        message: String,
    },

    /// Network or remote lookup error
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// The router refused or failed to perform a navigation
    #[error("Navigation to {path} failed: {message}")]
    Navigation {
        /// Target path of the failed navigation
        path: String,
        /// Error message reported by the router
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl RouteguardError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a navigation error for `path`
    pub fn navigation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` for failures of a remote dependency (version or feature lookups).
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Serialization { .. })
    }
}

/// Standard Result type for Routeguard operations
pub type Result<T> = std::result::Result<T, RouteguardError>;

impl From<serde_json::Error> for RouteguardError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RouteguardError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<std::io::Error> for RouteguardError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::config(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}
