//! Bearer-token lookup for outgoing requests

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token store unavailable: {0}")]
    Unavailable(String),

    #[error("stored token is not a valid header value")]
    InvalidToken,
}

/// Source of the current authentication token.
///
/// The client only reads from it; storing and refreshing tokens belongs to
/// whoever owns the store.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Current token, or `None` when the user is signed out
    async fn token(&self) -> Result<Option<String>, TokenStoreError>;
}

/// Token kept in process memory
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub async fn set(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.token.read().await.clone())
    }
}

/// Set `Authorization: Bearer <token>` when the store has a token.
///
/// Empty tokens count as signed out.
pub async fn authorize(
    request: RequestBuilder,
    store: &dyn TokenStore,
) -> Result<RequestBuilder, TokenStoreError> {
    match store.token().await? {
        Some(token) if !token.is_empty() => {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| TokenStoreError::InvalidToken)?;
            value.set_sensitive(true);
            Ok(request.header(AUTHORIZATION, value))
        }
        _ => Ok(request),
    }
}
