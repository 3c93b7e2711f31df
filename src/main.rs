use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mentor_api_client::api::{ApiClient, LoggingNavigator, MemoryTokenStore};
use mentor_api_client::config::Config;
use mentor_api_client::errors::ApiError;
use mentor_api_client::metrics;

/// Call the mentor API with the configured base URL and token
#[derive(Debug, Parser)]
#[command(name = "mentor-api", version)]
struct Cli {
    /// Path relative to the API base URL, e.g. /mentors
    path: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    method: Method,

    /// JSON request body
    #[arg(short, long)]
    data: Option<String>,

    /// Print client metrics after the request
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pipeable JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,mentor_api_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    metrics::init_metrics();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded, API at {}", config.api.base_url);

    let token = std::env::var("API_TOKEN").ok();
    let client = ApiClient::builder()
        .config(config.api)
        .token_store(Arc::new(MemoryTokenStore::new(token)))
        .navigator(Arc::new(LoggingNavigator))
        .build()
        .context("Failed to create API client")?;

    let body: Option<Value> = cli
        .data
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--data must be valid JSON")?;

    let result: Result<Value, ApiError> = client.request(cli.method, &cli.path, body.as_ref()).await;

    let succeeded = match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            true
        }
        Err(err) => {
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            false
        }
    };

    if cli.metrics {
        print!("{}", metrics::render());
    }

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
