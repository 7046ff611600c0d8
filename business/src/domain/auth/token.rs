use crate::domain::errors::StorageError;

/// Opaque bearer credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Synchronous accessor for the current bearer token.
///
/// Owned by the authentication side; the cart only reads it to decide whether
/// a remote call is made at all.
pub trait AuthTokenProvider: Send + Sync {
    fn current_token(&self) -> Option<AuthToken>;
}

/// Token accessor that login/logout flows can also write through.
pub trait SessionTokenStore: AuthTokenProvider {
    fn store_token(&self, token: &AuthToken) -> Result<(), StorageError>;
    fn clear_token(&self) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_blank_tokens() {
        assert!(AuthToken::parse("").is_none());
        assert!(AuthToken::parse("   \n").is_none());
    }

    #[test]
    fn should_trim_surrounding_whitespace() {
        let token = AuthToken::parse("  abc.def  ").unwrap();
        assert_eq!(token.as_str(), "abc.def");
    }

    #[test]
    fn should_redact_token_in_debug_output() {
        let token = AuthToken::parse("secret-value").unwrap();
        assert!(!format!("{:?}", token).contains("secret"));
    }
}
