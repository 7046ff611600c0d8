/// Durable storage errors.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage.read_failed")]
    Read,
    #[error("storage.write_failed")]
    Write,
    #[error("storage.invalid_key")]
    InvalidKey,
}

/// Failures of the remote cart service.
///
/// Every variant is treated the same way by the cart store (the remote leg is
/// discarded); the distinction only matters for logs and adapter tests.
#[derive(Debug, thiserror::Error)]
pub enum RemoteCartError {
    #[error("remote_cart.transport: {0}")]
    Transport(String),
    #[error("remote_cart.unauthorized")]
    Unauthorized,
    #[error("remote_cart.status: {0}")]
    Status(u16),
    #[error("remote_cart.rejected: {status_code} {message}")]
    Rejected { status_code: u16, message: String },
    #[error("remote_cart.decode: {0}")]
    Decode(String),
}

impl RemoteCartError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        RemoteCartError::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        RemoteCartError::Decode(err.to_string())
    }
}
