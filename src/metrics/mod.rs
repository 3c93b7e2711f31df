pub mod registry;

use prometheus::{Encoder, TextEncoder};

/// Render all registered metrics in Prometheus exposition format
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => String::from_utf8(buffer).unwrap_or_default(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            String::new()
        }
    }
}

// Re-export commonly used metrics for convenience
pub use registry::{
    init_metrics, API_ERRORS_TOTAL, API_LOGIN_REDIRECTS_TOTAL, API_REQUESTS_TOTAL,
    API_REQUEST_DURATION_SECONDS,
};
