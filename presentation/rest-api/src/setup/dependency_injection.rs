use std::sync::Arc;

use anyhow::Context;

use logger::TracingLogger;
use persistence::file_storage::FileStorage;
use persistence::token_provider::StoredTokenProvider;

use cart_api::client::CartApiClient;
use cart_api::remote_cart::RemoteCartHttp;

use business::application::cart::store::{CartStore, CartStoreDeps};
use business::domain::cart::manager::CartManager;

use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub cart_api: crate::api::cart::routes::CartApi,
    pub session_api: crate::api::session::routes::SessionApi,
    pub cart: Arc<dyn CartManager>,
}

impl DependencyContainer {
    /// Must run inside the Tokio runtime: starting the cart spawns its sync worker.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let storage = Arc::new(
            FileStorage::open(&config.storage.dir)
                .with_context(|| format!("opening {}", config.storage.dir.display()))?,
        );
        let tokens = Arc::new(StoredTokenProvider::new(storage.clone()));
        let api_client =
            CartApiClient::new(config.cart_api.base_url.clone(), config.cart_api.timeout)
                .context("resolving remote cart endpoints")?;
        let remote = Arc::new(RemoteCartHttp::new(api_client));

        // Cart store
        let cart: Arc<dyn CartManager> = Arc::new(CartStore::start(CartStoreDeps {
            storage,
            tokens: tokens.clone(),
            remote,
            logger: Arc::new(TracingLogger::new("cart")),
        }));

        let cart_api = crate::api::cart::routes::CartApi::new(cart.clone());
        let session_api = crate::api::session::routes::SessionApi::new(tokens, cart.clone());

        Ok(Self {
            health_api,
            cart_api,
            session_api,
            cart,
        })
    }
}
