//! Turns any failed request into an [`ApiError`].
//!
//! Normalization is a pure function of the failure. The login redirect is
//! decided here ([`ApiError::requires_login`]) but performed by the client,
//! which owns the navigator.

use serde_json::Value;
use std::error::Error as StdError;
use std::sync::Arc;

use super::codes::ErrorCode;
use super::response::{ApiError, ErrorDetail, ErrorSource};

pub const DEFAULT_MESSAGE: &str = "An unexpected error occurred";
pub const VALIDATION_MESSAGE: &str = "Validation error occurred";
pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred. Please try again later.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "No response received from server. Please check your connection.";

/// 401s carrying one of these are OAuth registration failures, not expired sessions
const REGISTRATION_MARKERS: [&str; 2] = ["not registered", "Google account not registered"];

/// How a request failed, before normalization
#[derive(Debug)]
pub enum RequestFailure {
    /// The server answered, with a failing status or an undecodable body
    Response {
        status: u16,
        body: Option<Value>,
        source: Option<ErrorSource>,
    },
    /// The request went out but no response came back
    NoResponse { source: ErrorSource },
    /// The request was never dispatched
    NotSent { source: ErrorSource },
}

impl RequestFailure {
    /// Classify a transport error by whether the request left the client
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::NotSent {
                source: Arc::new(err),
            }
        } else {
            Self::NoResponse {
                source: Arc::new(err),
            }
        }
    }

    pub fn not_sent(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::NotSent {
            source: Arc::new(err),
        }
    }

    /// A failing status with whatever body the server sent
    pub fn status(status: u16, body: Option<Value>) -> Self {
        Self::Response {
            status,
            body,
            source: None,
        }
    }
}

impl ApiError {
    /// Build the normalized error for a failed request
    pub fn from_failure(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Response {
                status,
                body,
                source,
            } => {
                let detail = body.as_ref().and_then(ErrorDetail::from_body);
                let code = ErrorCode::from_status(status).unwrap_or_default();
                let message = match code {
                    ErrorCode::ServerError => SERVER_ERROR_MESSAGE.to_string(),
                    ErrorCode::ValidationError => validation_message(detail.as_ref()),
                    _ => detail
                        .as_ref()
                        .and_then(ErrorDetail::as_message)
                        .filter(|m| !m.is_empty())
                        .unwrap_or(DEFAULT_MESSAGE)
                        .to_string(),
                };

                let error = ApiError::new(code, message).with_response(status, detail);
                match source {
                    Some(source) => error.with_source(source),
                    None => error,
                }
            }
            RequestFailure::NoResponse { source } => {
                ApiError::new(ErrorCode::NetworkError, NETWORK_ERROR_MESSAGE).with_source(source)
            }
            RequestFailure::NotSent { source } => {
                ApiError::new(ErrorCode::UnknownError, DEFAULT_MESSAGE).with_source(source)
            }
        }
    }

    /// True when this failure should send the user back to the login page
    pub fn requires_login(&self) -> bool {
        self.status() == Some(401)
            && !REGISTRATION_MARKERS
                .iter()
                .any(|marker| self.message.contains(marker))
    }
}

fn validation_message(detail: Option<&ErrorDetail>) -> String {
    match detail {
        Some(ErrorDetail::Validation(issues)) if !issues.is_empty() => issues
            .iter()
            .map(|issue| issue.msg.as_str())
            .collect::<Vec<_>>()
            .join(". "),
        Some(ErrorDetail::Message(message)) if !message.is_empty() => message.clone(),
        _ => VALIDATION_MESSAGE.to_string(),
    }
}
