use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::EntityLookupError;
use crate::http::{DEFAULT_USER_AGENT, ProviderBuildError, build_client, trim_base_url};

/// Public Wikidata site.
pub const DEFAULT_WIKIDATA_BASE_URL: &str = "https://www.wikidata.org";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of Wikidata entity documents.
#[async_trait(?Send)]
pub trait EntitySource {
    /// Fetch the JSON document describing `entity_id`.
    async fn fetch_entity(&self, entity_id: &str) -> Result<Value, EntityLookupError>;
}

/// Configuration for [`HttpEntitySource`].
#[derive(Debug, Clone)]
pub struct WikidataConfig {
    /// Site serving `Special:EntityData`, without a trailing slash.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Honour proxy settings from the environment.
    pub system_proxy: bool,
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WIKIDATA_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            system_proxy: true,
        }
    }
}

impl WikidataConfig {
    /// Create a configuration targeting `base_url`.
    #[must_use]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: trim_base_url(base_url.as_ref()),
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

/// HTTP implementation of [`EntitySource`] using `Special:EntityData`.
#[derive(Debug)]
pub struct HttpEntitySource {
    client: Client,
    config: WikidataConfig,
}

impl HttpEntitySource {
    /// Create a source for the Wikidata site at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ProviderBuildError> {
        Self::with_config(WikidataConfig::new(base_url))
    }

    /// Create a source from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: WikidataConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(&config.user_agent, config.timeout, config.system_proxy)?;
        Ok(Self { client, config })
    }

    /// URL of the JSON document for `entity_id`.
    ///
    /// The id is percent-encoded, so unusual tag values cannot escape the
    /// path segment.
    #[must_use]
    pub fn entity_url(&self, entity_id: &str) -> String {
        format!(
            "{}/wiki/Special:EntityData/{}.json",
            self.config.base_url,
            urlencoding::encode(entity_id)
        )
    }
}

#[async_trait(?Send)]
impl EntitySource for HttpEntitySource {
    async fn fetch_entity(&self, entity_id: &str) -> Result<Value, EntityLookupError> {
        let url = self.entity_url(entity_id);
        let transport = |source: reqwest::Error| EntityLookupError::Transport {
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(EntityLookupError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|source| EntityLookupError::Decode { url, source })
    }
}
