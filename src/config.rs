/// Configuration management for the routing directory
use crate::error::{RouterError, RouterResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub directory: DirectoryConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
}

/// Provider directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// How long an announcement stays valid, in seconds
    pub provider_ttl_secs: u64,
    /// Cadence of the background expiry sweep, in seconds; 0 disables it
    pub sweep_interval_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> RouterResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("ROUTER_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("ROUTER_PORT")
            .unwrap_or_else(|_| "8190".to_string())
            .parse()
            .map_err(|_| RouterError::Validation("Invalid port number".to_string()))?;

        // 24 hours unless overridden; tests inject much shorter TTLs
        let provider_ttl_secs = env::var("ROUTER_PROVIDER_TTL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);
        let sweep_interval_secs = env::var("ROUTER_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(ServerConfig {
            service: ServiceConfig { hostname, port },
            directory: DirectoryConfig {
                provider_ttl_secs,
                sweep_interval_secs,
            },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> RouterResult<()> {
        if self.service.hostname.is_empty() {
            return Err(RouterError::Validation("Hostname cannot be empty".to_string()));
        }

        if self.directory.provider_ttl_secs == 0 {
            return Err(RouterError::Validation(
                "Provider TTL must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Announcement TTL as a duration
    pub fn provider_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.directory.provider_ttl_secs as i64)
    }
}
