use std::sync::Arc;

use business::domain::auth::token::{AuthToken, AuthTokenProvider, SessionTokenStore};
use business::domain::errors::StorageError;
use business::domain::storage::{KeyValueStorage, TOKEN_STORAGE_KEY};

/// Keeps the session token in durable storage under a single key.
pub struct StoredTokenProvider {
    storage: Arc<dyn KeyValueStorage>,
}

impl StoredTokenProvider {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }
}

impl AuthTokenProvider for StoredTokenProvider {
    fn current_token(&self) -> Option<AuthToken> {
        match self.storage.read(TOKEN_STORAGE_KEY) {
            Ok(raw) => raw.and_then(AuthToken::parse),
            Err(err) => {
                // An unreadable token means the cart behaves as a guest cart.
                tracing::debug!(error = %err, "session token unavailable");
                None
            }
        }
    }
}

impl SessionTokenStore for StoredTokenProvider {
    fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        self.storage.write(TOKEN_STORAGE_KEY, token.as_str())
    }

    fn clear_token(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_STORAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_storage::InMemoryStorage;

    fn provider() -> (Arc<InMemoryStorage>, StoredTokenProvider) {
        let storage = Arc::new(InMemoryStorage::new());
        (storage.clone(), StoredTokenProvider::new(storage))
    }

    #[test]
    fn should_have_no_token_initially() {
        let (_, tokens) = provider();

        assert!(tokens.current_token().is_none());
    }

    #[test]
    fn should_return_stored_token() {
        let (_, tokens) = provider();

        tokens.store_token(&AuthToken::parse("abc").unwrap()).unwrap();

        assert_eq!(tokens.current_token().unwrap().as_str(), "abc");
    }

    #[test]
    fn should_treat_blank_stored_token_as_absent() {
        let (storage, tokens) = provider();

        storage.write(TOKEN_STORAGE_KEY, "   ").unwrap();

        assert!(tokens.current_token().is_none());
    }

    #[test]
    fn should_forget_token_after_clear() {
        let (_, tokens) = provider();
        tokens.store_token(&AuthToken::parse("abc").unwrap()).unwrap();

        tokens.clear_token().unwrap();

        assert!(tokens.current_token().is_none());
    }
}
