/// Application context and shared state
use crate::{config::ServerConfig, directory::ProviderDirectory, error::RouterResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Application context holding the shared services
///
/// Cheap to clone; every handle refers to the same directory and counter.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub directory: Arc<ProviderDirectory>,
    lookup_requests: Arc<AtomicU64>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub fn new(config: ServerConfig) -> RouterResult<Self> {
        config.validate()?;

        let directory = Arc::new(ProviderDirectory::new(config.provider_ttl()));

        Ok(Self {
            config: Arc::new(config),
            directory,
            lookup_requests: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Count one provider-lookup request, returning the running total
    pub(crate) fn record_lookup_request(&self) -> u64 {
        self.lookup_requests.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of provider-lookup requests served since startup
    pub fn query_count(&self) -> u64 {
        self.lookup_requests.load(Ordering::Relaxed)
    }

    /// Base URL the service answers on
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}
