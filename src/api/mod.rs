//! Authenticated HTTP access to the mentor API

pub mod auth;
pub mod client;
pub mod navigation;

pub use auth::{MemoryTokenStore, TokenStore, TokenStoreError};
pub use client::{ApiClient, ApiClientBuilder};
pub use navigation::{LoggingNavigator, Navigator, LOGIN_PATH};
