/// Delegated routing client
///
/// The consuming side of the wire contract: given a router's base URL and a
/// routing key, fetch the provider list a peer can dial. Used by peers that
/// delegate discovery instead of running a distributed lookup themselves.
use crate::{
    api::routing::{ProviderEntry, ProvidersResponse},
    error::{RouterError, RouterResult},
    routing_key::RoutingKey,
};
use tracing::debug;

/// Routing client configuration
#[derive(Debug, Clone)]
pub struct RoutingClientConfig {
    /// User-Agent header for HTTP requests
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RoutingClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "Polaris-Router/0.1".to_string(),
            timeout_secs: 10,
        }
    }
}

/// HTTP client for a remote routing directory
#[derive(Clone)]
pub struct RoutingClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RoutingClient {
    /// Create a client for the directory at `base_url`
    pub fn new(base_url: impl Into<String>, config: RoutingClientConfig) -> RouterResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RouterError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let base_url: String = base_url.into();

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Fetch the providers for a key
    ///
    /// A 404 from the router is a miss, not an error.
    pub async fn find_providers(&self, key: &RoutingKey) -> RouterResult<Vec<ProviderEntry>> {
        let url = self.providers_url(key);
        debug!("Fetching providers from {}", url);

        let response = self.http_client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(vec![]);
        }

        if !response.status().is_success() {
            return Err(RouterError::Internal(format!(
                "Router returned status {} for {}",
                response.status(),
                url
            )));
        }

        let body: ProvidersResponse = response.json().await?;
        Ok(body.providers)
    }

    /// URL of the providers resource for a key
    fn providers_url(&self, key: &RoutingKey) -> String {
        format!(
            "{}/routing/v1/providers/{}",
            self.base_url,
            urlencoding::encode(&key.canonical())
        )
    }
}
