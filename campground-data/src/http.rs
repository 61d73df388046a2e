//! Shared HTTP client construction for the remote sources.

use std::time::Duration;

use reqwest::Client;

/// Default user agent sent to Overpass and Wikidata.
///
/// Both services ask clients to identify themselves.
pub const DEFAULT_USER_AGENT: &str = "campground-seed/0.1";

/// Error type for HTTP source construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
        }
    }
}

/// Build a client with the supplied user agent and overall timeout.
///
/// When `system_proxy` is false the `HTTP_PROXY` family of variables is
/// ignored and requests go direct.
pub(crate) fn build_client(
    user_agent: &str,
    timeout: Duration,
    system_proxy: bool,
) -> Result<Client, ProviderBuildError> {
    let builder = Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout);
    let builder = if system_proxy {
        builder
    } else {
        builder.no_proxy()
    };
    builder.build().map_err(ProviderBuildError::HttpClient)
}

/// Trim trailing slashes so paths can be appended with a single `/`.
pub(crate) fn trim_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://www.wikidata.org", "https://www.wikidata.org")]
    #[case("https://www.wikidata.org/", "https://www.wikidata.org")]
    #[case(" http://localhost:8080// ", "http://localhost:8080")]
    fn trims_trailing_slashes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(trim_base_url(raw), expected);
    }

    #[rstest]
    fn builds_client_with_custom_agent() {
        let client = build_client("campground-test/0.0", Duration::from_secs(5), false);
        assert!(client.is_ok());
    }
}
