use std::env;
use std::time::Duration;

use url::Url;

use super::error::ConfigError;

/// Remote cart service access.
#[derive(Debug, Clone)]
pub struct CartApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl CartApiConfig {
    /// Environment variables:
    /// - CART_API_BASE_URL: backend API root (required)
    /// - CART_API_TIMEOUT_SECS: per-request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("CART_API_BASE_URL").ok_or(ConfigError::Missing("CART_API_BASE_URL"))?;
        let base_url = Url::parse(raw_url.trim()).map_err(|e| ConfigError::Invalid {
            name: "CART_API_BASE_URL",
            reason: e.to_string(),
        })?;

        let timeout = match lookup("CART_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    name: "CART_API_TIMEOUT_SECS",
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: "CART_API_TIMEOUT_SECS",
                        reason: "must be positive".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => cart_api::client::DEFAULT_TIMEOUT,
        };

        Ok(Self { base_url, timeout })
    }
}
