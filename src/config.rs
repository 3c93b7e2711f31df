use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Keep cookies across requests so session credentials ride along
    pub with_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            with_credentials: true,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            api: ApiConfig {
                base_url: env::var("NEXT_PUBLIC_API_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                with_credentials: env::var("API_WITH_CREDENTIALS")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()
                    .context("API_WITH_CREDENTIALS must be true or false")?,
            },
        })
    }
}
