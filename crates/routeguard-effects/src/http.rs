//! HTTP lookup handlers
//!
//! ```text
//! GET  {base_url}/api/version          → { "version": "2.4.1" }
//! POST {base_url}/api/features/check   { "features": [..] } → { "disabledFeatures": [..] }
//! ```
//!
//! Transport failures and non-2xx answers surface as `RouteguardError::Network`, bodies
//! that do not parse as `RouteguardError::Serialization`. The validator decides what a
//! failed lookup means.

use async_trait::async_trait;
use routeguard_core::{
    FeatureFlagEffects, LookupConfig, Result, RouteguardError, VersionEffects,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

const VERSION_ENDPOINT: &str = "/api/version";
const FEATURE_CHECK_ENDPOINT: &str = "/api/features/check";

/// Body of `GET /api/version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Running application version.
    pub version: String,
}

/// Body sent to `POST /api/features/check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCheckRequest {
    /// Features the route depends on.
    pub features: Vec<String>,
}

/// Answer of `POST /api/features/check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCheckResponse {
    /// Requested features that are currently switched off.
    #[serde(default)]
    pub disabled_features: Vec<String>,
}

fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RouteguardError::config(format!("Failed to build HTTP client: {e}")))
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(RouteguardError::network(format!(
            "{url} answered with status {status}"
        )));
    }
    let body = response
        .bytes()
        .await
        .map_err(|e| RouteguardError::network(format!("Failed to read body from {url}: {e}")))?;
    serde_json::from_slice(&body).map_err(|e| {
        RouteguardError::serialization(format!("Malformed response from {url}: {e}"))
    })
}

/// Version lookup over HTTP.
#[derive(Debug, Clone)]
pub struct HttpVersionHandler {
    client: reqwest::Client,
    url: String,
}

impl HttpVersionHandler {
    /// Handler querying `{base_url}/api/version`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(build_client(timeout)?, base_url))
    }

    /// Handler reusing an existing client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: endpoint(base_url, VERSION_ENDPOINT),
        }
    }

    /// Full endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl VersionEffects for HttpVersionHandler {
    async fn app_version(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            RouteguardError::network(format!("Failed to query {}: {e}", self.url))
        })?;
        let body: VersionResponse = read_json(response, &self.url).await?;
        tracing::debug!(version = %body.version, "Fetched application version");
        Ok(body.version)
    }
}

/// Feature-flag lookup over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFeatureFlagHandler {
    client: reqwest::Client,
    url: String,
}

impl HttpFeatureFlagHandler {
    /// Handler posting to `{base_url}/api/features/check`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(build_client(timeout)?, base_url))
    }

    /// Handler reusing an existing client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: endpoint(base_url, FEATURE_CHECK_ENDPOINT),
        }
    }

    /// Full endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeatureFlagEffects for HttpFeatureFlagHandler {
    async fn disabled_features(&self, features: &[String]) -> Result<Vec<String>> {
        let request = FeatureCheckRequest {
            features: features.to_vec(),
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RouteguardError::network(format!("Failed to query {}: {e}", self.url)))?;
        let body: FeatureCheckResponse = read_json(response, &self.url).await?;
        tracing::debug!(
            requested = features.len(),
            disabled = body.disabled_features.len(),
            "Checked feature flags"
        );
        Ok(body.disabled_features)
    }
}

/// Both HTTP lookups behind one client, configured from `LookupConfig`.
#[derive(Debug, Clone)]
pub struct HttpLookups {
    version: HttpVersionHandler,
    features: HttpFeatureFlagHandler,
}

impl HttpLookups {
    /// Lookups against `config.base_url` with `config.timeout_ms` per request.
    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(RouteguardError::config("lookups.base_url must not be empty"));
        }
        let client = build_client(Duration::from_millis(config.timeout_ms))?;
        Ok(Self {
            version: HttpVersionHandler::with_client(client.clone(), &config.base_url),
            features: HttpFeatureFlagHandler::with_client(client, &config.base_url),
        })
    }

    /// Version handler.
    pub fn version_handler(&self) -> &HttpVersionHandler {
        &self.version
    }

    /// Feature-flag handler.
    pub fn feature_handler(&self) -> &HttpFeatureFlagHandler {
        &self.features
    }
}

#[async_trait]
impl VersionEffects for HttpLookups {
    async fn app_version(&self) -> Result<String> {
        self.version.app_version().await
    }
}

#[async_trait]
impl FeatureFlagEffects for HttpLookups {
    async fn disabled_features(&self, features: &[String]) -> Result<Vec<String>> {
        self.features.disabled_features(features).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slash() {
        let config = LookupConfig {
            base_url: "https://app.example.com/".into(),
            ..LookupConfig::default()
        };
        let lookups = HttpLookups::from_config(&config).unwrap();
        assert_eq!(
            lookups.version_handler().url(),
            "https://app.example.com/api/version"
        );
        assert_eq!(
            lookups.feature_handler().url(),
            "https://app.example.com/api/features/check"
        );
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let config = LookupConfig {
            base_url: "  ".into(),
            ..LookupConfig::default()
        };
        assert!(matches!(
            HttpLookups::from_config(&config),
            Err(RouteguardError::Config { .. })
        ));
    }

    #[test]
    fn wire_shapes() {
        let request = serde_json::to_value(FeatureCheckRequest {
            features: vec!["shop".into()],
        })
        .unwrap();
        assert_eq!(request, serde_json::json!({ "features": ["shop"] }));

        let response: FeatureCheckResponse =
            serde_json::from_str(r#"{ "disabledFeatures": ["shop", "claims"] }"#).unwrap();
        assert_eq!(response.disabled_features, vec!["shop", "claims"]);

        let empty: FeatureCheckResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.disabled_features.is_empty());

        let version: VersionResponse = serde_json::from_str(r#"{ "version": "2.4.1" }"#).unwrap();
        assert_eq!(version.version, "2.4.1");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_lookup_failure() {
        let config = LookupConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_ms: 500,
            ..LookupConfig::default()
        };
        let lookups = HttpLookups::from_config(&config).unwrap();

        let err = lookups.app_version().await.unwrap_err();
        assert!(err.is_lookup_failure());
        let err = lookups
            .disabled_features(&["shop".to_string()])
            .await
            .unwrap_err();
        assert!(err.is_lookup_failure());
    }
}
