use poem_openapi::Object;

use business::domain::auth::token::AuthToken;
use business::domain::errors::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session.token_empty")]
    TokenEmpty,
    #[error("storage.write_failed")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Object)]
pub struct StoreTokenRequest {
    /// Bearer token issued by the login flow
    pub token: String,
}

impl StoreTokenRequest {
    pub fn into_token(self) -> Result<AuthToken, SessionError> {
        AuthToken::parse(self.token).ok_or(SessionError::TokenEmpty)
    }
}
