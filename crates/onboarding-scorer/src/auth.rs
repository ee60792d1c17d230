//! Shared-secret check for trusted internal callers.

use crate::config::AuthConfig;

/// Header carrying the internal token.
pub const INTERNAL_TOKEN_HEADER: &str = "x-internal-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Internal token required in X-Internal-Token header")]
    MissingToken,
    #[error("Invalid internal token")]
    InvalidToken,
}

/// Compares presented tokens against the configured secret.
#[derive(Clone)]
pub struct TokenVerifier {
    expected: String,
}

impl TokenVerifier {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.internal_token.clone())
    }

    /// An absent or empty header counts as missing.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), AuthError> {
        match presented {
            None | Some("") => Err(AuthError::MissingToken),
            Some(token) if token == self.expected => Ok(()),
            Some(_) => Err(AuthError::InvalidToken),
        }
    }
}
