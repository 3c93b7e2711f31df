// Library exports for testing
pub mod api;
pub mod config;
pub mod errors;
pub mod metrics;

pub use api::{ApiClient, MemoryTokenStore, Navigator, TokenStore};
pub use config::{ApiConfig, Config};
pub use errors::{ApiError, ErrorCode};
