//! OAuth token values and the token store contract.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

/// Access and refresh tokens issued by the API.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthTokens {
    /// Bearer token attached to authenticated requests.
    pub access_token: String,
    /// Token exchanged for a new access token once it expires.
    pub refresh_token: Option<String>,
}

impl OAuthTokens {
    /// Creates a token pair.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
        }
    }
}

impl fmt::Debug for OAuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthTokens")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Failure reported by a token store when persisting tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("token store could not save tokens: {message}")]
pub struct TokenStoreError {
    /// Detail from the underlying store.
    pub message: String,
}

/// Storage for the current credentials.
///
/// A store holds at most one access token and one refresh token. Saving
/// overwrites both, clearing the refresh token when the new pair has none.
/// Clearing removes both and cannot fail.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Returns the current access token.
    fn access_token(&self) -> Option<String>;

    /// Returns the current refresh token.
    fn refresh_token(&self) -> Option<String>;

    /// Replaces the stored tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when the backing store rejects the write.
    fn save_tokens(&self, tokens: &OAuthTokens) -> Result<(), TokenStoreError>;

    /// Removes every stored token.
    fn clear_tokens(&self);
}

/// Process-local token store.
#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: RwLock<Option<OAuthTokens>>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with tokens.
    #[must_use]
    pub const fn with_tokens(tokens: OAuthTokens) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }

    fn snapshot(&self) -> Option<OAuthTokens> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for InMemoryTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTokenStore")
            .field("tokens", &self.snapshot())
            .finish()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.snapshot().map(|tokens| tokens.access_token)
    }

    fn refresh_token(&self) -> Option<String> {
        self.snapshot().and_then(|tokens| tokens.refresh_token)
    }

    fn save_tokens(&self, tokens: &OAuthTokens) -> Result<(), TokenStoreError> {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Some(tokens.clone());
        Ok(())
    }

    fn clear_tokens(&self) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
