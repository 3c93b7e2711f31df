use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace};

use crate::api::auth::{self, MemoryTokenStore, TokenStore};
use crate::api::navigation::{LoggingNavigator, Navigator, LOGIN_PATH};
use crate::config::ApiConfig;
use crate::errors::{ApiError, RequestFailure};
use crate::metrics::registry::{
    API_ERRORS_TOTAL, API_LOGIN_REDIRECTS_TOTAL, API_REQUESTS_TOTAL,
    API_REQUEST_DURATION_SECONDS,
};

/// HTTP client for the mentor API.
///
/// Every request goes through the same steps: bearer token injection, send,
/// then either the decoded body or a normalized [`ApiError`]. Nothing is
/// retried.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        token_store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("mentor-api-client/", env!("CARGO_PKG_VERSION")))
            .default_headers({
                let mut headers = HeaderMap::new();
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                headers
            })
            .cookie_store(config.with_credentials)
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        info!(
            "Initialized API client for {} (credentials: {})",
            base_url, config.with_credentials
        );

        Ok(Self {
            http_client,
            base_url,
            token_store,
            navigator,
        })
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path against the base URL. Absolute URLs are used as-is.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, |request| request).await
    }

    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::GET, path, |request| request.query(query))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, |request| request).await
    }

    /// Issue a request with an optional JSON body
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(method, path, |request| match body {
            Some(body) => request.json(body),
            None => request,
        })
        .await
    }

    #[instrument(skip_all, fields(method = %method, path = %path))]
    async fn send<T, F>(&self, method: Method, path: &str, prepare: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let method_label = method.to_string();
        API_REQUESTS_TOTAL
            .with_label_values(&[method_label.as_str()])
            .inc();
        let timer = API_REQUEST_DURATION_SECONDS
            .with_label_values(&[method_label.as_str()])
            .start_timer();

        let url = self.url(path);
        let result = self
            .dispatch(method, &url, prepare)
            .await
            .map_err(|failure| self.reject(failure));

        timer.observe_duration();
        result
    }

    async fn dispatch<T, F>(&self, method: Method, url: &str, prepare: F) -> Result<T, RequestFailure>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let request = self.http_client.request(method, url);
        let request = auth::authorize(request, self.token_store.as_ref())
            .await
            .map_err(RequestFailure::not_sent)?;

        debug!(url = %url, "Dispatching request");

        let response = prepare(request)
            .send()
            .await
            .map_err(RequestFailure::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok());
            return Err(RequestFailure::status(status.as_u16(), body));
        }

        decode_body(response).await
    }

    /// Normalize a failure, redirecting to login when the session is gone
    fn reject(&self, failure: RequestFailure) -> ApiError {
        let error = ApiError::from_failure(failure);

        API_ERRORS_TOTAL
            .with_label_values(&[error.code.as_str()])
            .inc();
        trace!(
            code = %error.code,
            status = ?error.status(),
            message = %error.message,
            "Request failed"
        );

        if error.requires_login() {
            API_LOGIN_REDIRECTS_TOTAL.inc();
            info!("Unauthorized response, redirecting to {}", LOGIN_PATH);
            self.navigator.redirect(LOGIN_PATH);
        }

        error
    }
}

/// Decode a successful body. Empty bodies (204, 205) decode from `null`.
async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, RequestFailure> {
    let status = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RequestFailure::Response {
            status,
            body: None,
            source: Some(Arc::new(e)),
        })?;

    let decoded = if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(&bytes)
    };

    decoded.map_err(|e| RequestFailure::Response {
        status,
        body: None,
        source: Some(Arc::new(e)),
    })
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    token_store: Option<Arc<dyn TokenStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClientBuilder {
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let config = self.config.take().unwrap_or_default();
        self.config = Some(ApiConfig {
            base_url: base_url.into(),
            ..config
        });
        self
    }

    pub fn token_store(mut self, token_store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(token_store);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the client. Missing collaborators fall back to an empty token
    /// store and a navigator that only logs.
    pub fn build(self) -> Result<ApiClient> {
        let config = self.config.unwrap_or_default();
        let token_store: Arc<dyn TokenStore> = match self.token_store {
            Some(token_store) => token_store,
            None => Arc::new(MemoryTokenStore::empty()),
        };
        let navigator: Arc<dyn Navigator> = match self.navigator {
            Some(navigator) => navigator,
            None => Arc::new(LoggingNavigator),
        };

        ApiClient::new(&config, token_store, navigator)
    }
}
