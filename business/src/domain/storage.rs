use super::errors::StorageError;

/// Key under which the cart lines are persisted.
pub const CART_STORAGE_KEY: &str = "kk_cart";

/// Key under which the session bearer token is persisted.
pub const TOKEN_STORAGE_KEY: &str = "kk_token";

/// Durable key-value storage port (the browser's local storage, on the web).
///
/// Calls are synchronous and each one is atomic on its own; callers never hold
/// more than one key in flight.
pub trait KeyValueStorage: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
