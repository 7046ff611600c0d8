use super::{
    cart_api_config::CartApiConfig, cors_config, error::ConfigError,
    server_config::ServerConfig, storage_config::StorageConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub cart_api: CartApiConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            cart_api: CartApiConfig::from_env()?,
            storage: StorageConfig::from_env(),
        })
    }
}
