use std::time::Duration;

use async_trait::async_trait;
use campground_core::RawElement;
use reqwest::Client;
use serde::Deserialize;

use super::OverpassError;
use crate::http::{DEFAULT_USER_AGENT, ProviderBuildError, build_client};

/// Public Overpass interpreter endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Query selecting every campsite inside Japan, with centers for areas.
pub const CAMP_SITE_QUERY: &str = r#"[out:json][timeout:60];
area["ISO3166-1"="JP"][admin_level=2]->.searchArea;
(
  node["tourism"="camp_site"](area.searchArea);
  way["tourism"="camp_site"](area.searchArea);
  relation["tourism"="camp_site"](area.searchArea);
);
out center tags;"#;

/// Overpass can take most of its own 60 s query budget before answering.
const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Source of raw campsite elements.
#[async_trait(?Send)]
pub trait ElementSource {
    /// Endpoint the elements are fetched from, for logging.
    fn endpoint(&self) -> &str;
    /// Fetch every campsite element in one request.
    async fn fetch_elements(&self) -> Result<Vec<RawElement>, OverpassError>;
}

/// Configuration for [`HttpOverpassSource`].
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoint receiving the query.
    pub endpoint: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Honour proxy settings from the environment.
    pub system_proxy: bool,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            system_proxy: true,
        }
    }
}

impl OverpassConfig {
    /// Create a configuration targeting `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Choose whether proxy environment variables apply.
    #[must_use]
    pub const fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }
}

/// HTTP implementation of [`ElementSource`].
#[derive(Debug)]
pub struct HttpOverpassSource {
    client: Client,
    config: OverpassConfig,
}

impl HttpOverpassSource {
    /// Create a source posting to `endpoint` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OverpassConfig::new(endpoint))
    }

    /// Create a source from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: OverpassConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(&config.user_agent, config.timeout, config.system_proxy)?;
        Ok(Self { client, config })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &OverpassConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl ElementSource for HttpOverpassSource {
    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn fetch_elements(&self) -> Result<Vec<RawElement>, OverpassError> {
        let url = self.endpoint();
        let transport = |source: reqwest::Error| OverpassError::Transport {
            url: url.to_owned(),
            source,
        };

        let response = self
            .client
            .post(url)
            .form(&[("data", CAMP_SITE_QUERY)])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(transport)?;
            return Err(OverpassError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        decode_elements(&bytes).map_err(|source| OverpassError::Decode {
            url: url.to_owned(),
            source,
        })
    }
}

#[derive(Debug, Deserialize)]
struct InterpreterResponse {
    #[serde(default)]
    elements: Option<Vec<RawElement>>,
}

/// Decode an Overpass JSON answer into its elements.
///
/// A missing or `null` `elements` key yields an empty vector.
///
/// # Errors
///
/// Returns the `serde_json` error when `bytes` is not a JSON object of the
/// expected shape.
pub fn decode_elements(bytes: &[u8]) -> Result<Vec<RawElement>, serde_json::Error> {
    let response: InterpreterResponse = serde_json::from_slice(bytes)?;
    Ok(response.elements.unwrap_or_default())
}
