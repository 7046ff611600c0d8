use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::auth::token::SessionTokenStore;
use business::domain::cart::manager::CartManager;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::session::dto::{SessionError, StoreTokenRequest};
use crate::api::tags::ApiTags;

pub struct SessionApi {
    tokens: Arc<dyn SessionTokenStore>,
    cart: Arc<dyn CartManager>,
}

impl SessionApi {
    pub fn new(tokens: Arc<dyn SessionTokenStore>, cart: Arc<dyn CartManager>) -> Self {
        Self { tokens, cart }
    }
}

/// Session token API
///
/// The login and logout flows hand the bearer token over here; the cart uses
/// it to decide whether to sync with the server cart.
#[OpenApi]
impl SessionApi {
    /// Store the session token
    ///
    /// Replaces any stored token and asks the server for its cart.
    #[oai(path = "/session/token", method = "put", tag = "ApiTags::Session")]
    async fn store_token(&self, body: Json<StoreTokenRequest>) -> SessionResponse {
        let result = body
            .0
            .into_token()
            .and_then(|token| self.tokens.store_token(&token).map_err(SessionError::from));

        match result {
            Ok(()) => {
                self.cart.refresh();
                SessionResponse::NoContent
            }
            Err(err) => SessionResponse::from_error(err),
        }
    }

    /// Forget the session token
    ///
    /// The cart keeps its lines and continues as a guest cart.
    #[oai(path = "/session/token", method = "delete", tag = "ApiTags::Session")]
    async fn clear_token(&self) -> SessionResponse {
        match self.tokens.clear_token() {
            Ok(()) => SessionResponse::NoContent,
            Err(err) => SessionResponse::from_error(SessionError::from(err)),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum SessionResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl SessionResponse {
    fn from_error(err: SessionError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => SessionResponse::BadRequest(json),
            _ => SessionResponse::InternalError(json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use business::application::cart::store::{CartStore, CartStoreDeps};
    use business::domain::auth::token::{AuthToken, AuthTokenProvider};
    use business::domain::cart::remote::{
        AddItemRequest, RemoteCart, RemoteCartService, RemoveItemRequest, UpdateItemRequest,
    };
    use business::domain::errors::RemoteCartError;
    use logger::TracingLogger;
    use persistence::memory_storage::InMemoryStorage;
    use persistence::token_provider::StoredTokenProvider;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingRemote {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl RemoteCartService for CountingRemote {
        async fn fetch_cart(&self, _: &AuthToken) -> Result<RemoteCart, RemoteCartError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(RemoteCart {
                items: vec![],
                total: 0.0,
                tax_summary: None,
            })
        }
        async fn add_item(
            &self,
            _: &AuthToken,
            _: &AddItemRequest,
        ) -> Result<RemoteCart, RemoteCartError> {
            Err(RemoteCartError::Status(503))
        }
        async fn update_item(
            &self,
            _: &AuthToken,
            _: &UpdateItemRequest,
        ) -> Result<RemoteCart, RemoteCartError> {
            Err(RemoteCartError::Status(503))
        }
        async fn remove_item(
            &self,
            _: &AuthToken,
            _: &RemoveItemRequest,
        ) -> Result<RemoteCart, RemoteCartError> {
            Err(RemoteCartError::Status(503))
        }
        async fn clear_cart(&self, _: &AuthToken) -> Result<RemoteCart, RemoteCartError> {
            Err(RemoteCartError::Status(503))
        }
    }

    struct Fixture {
        cli: TestClient<poem::Route>,
        tokens: Arc<StoredTokenProvider>,
        cart: Arc<CartStore>,
        remote: Arc<CountingRemote>,
    }

    fn fixture() -> Fixture {
        let storage = Arc::new(InMemoryStorage::new());
        let tokens = Arc::new(StoredTokenProvider::new(storage.clone()));
        let remote = Arc::new(CountingRemote::default());
        let cart = Arc::new(CartStore::start(CartStoreDeps {
            storage,
            tokens: tokens.clone(),
            remote: remote.clone(),
            logger: Arc::new(TracingLogger::default()),
        }));
        let service = OpenApiService::new(
            SessionApi::new(tokens.clone(), cart.clone()),
            "Session",
            "test",
        );
        Fixture {
            cli: TestClient::new(poem::Route::new().nest("/", service)),
            tokens,
            cart,
            remote,
        }
    }

    #[tokio::test]
    async fn should_store_token_and_fetch_server_cart() {
        let f = fixture();

        let resp = f
            .cli
            .put("/session/token")
            .body_json(&json!({"token": "abc.def"}))
            .send()
            .await;
        f.cart.settle().await;

        resp.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(f.tokens.current_token().unwrap().as_str(), "abc.def");
        assert_eq!(f.remote.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_reject_blank_token() {
        let f = fixture();

        let resp = f
            .cli
            .put("/session/token")
            .body_json(&json!({"token": "   "}))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        assert!(f.tokens.current_token().is_none());
    }

    #[tokio::test]
    async fn should_clear_token() {
        let f = fixture();
        f.tokens
            .store_token(&AuthToken::parse("abc").unwrap())
            .unwrap();

        let resp = f.cli.delete("/session/token").send().await;

        resp.assert_status(StatusCode::NO_CONTENT);
        assert!(f.tokens.current_token().is_none());
    }
}
