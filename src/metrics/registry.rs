use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec,
};

lazy_static! {
    // Outgoing request metrics
    pub static ref API_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "api_client_requests_total",
        "Total requests issued by the API client",
        &["method"]
    )
    .unwrap();

    pub static ref API_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "api_client_request_duration_seconds",
        "API request duration in seconds, including auth lookup and normalization",
        &["method"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Failure metrics
    pub static ref API_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "api_client_errors_total",
        "Total normalized API errors",
        &["code"]  // code: UNAUTHORIZED, NETWORK_ERROR, ...
    )
    .unwrap();

    pub static ref API_LOGIN_REDIRECTS_TOTAL: IntCounter = register_int_counter!(
        "api_client_login_redirects_total",
        "Total redirects to the login page after a 401"
    )
    .unwrap();
}

/// Initialize all metrics (called on startup)
pub fn init_metrics() {
    // Force lazy_static initialization
    lazy_static::initialize(&API_REQUESTS_TOTAL);
    lazy_static::initialize(&API_REQUEST_DURATION_SECONDS);
    lazy_static::initialize(&API_ERRORS_TOTAL);
    lazy_static::initialize(&API_LOGIN_REDIRECTS_TOTAL);
}
