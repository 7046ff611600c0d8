use std::env;
use std::path::PathBuf;

/// Where the durable cart and session token live.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub dir: PathBuf,
}

impl StorageConfig {
    /// Environment variables:
    /// - CART_STORAGE_DIR: storage directory (default: ".storefront")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = lookup("CART_STORAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| ".storefront".to_string());
        Self {
            dir: PathBuf::from(dir),
        }
    }
}
