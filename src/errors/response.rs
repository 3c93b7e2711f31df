use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

use super::codes::ErrorCode;

/// Shared handle to the cause of a failed request
pub type ErrorSource = Arc<dyn StdError + Send + Sync + 'static>;

/// Normalized error returned by every failed API call
#[derive(Debug, Clone, Serialize, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message, always populated
    pub message: String,
    /// Code for programmatic handling
    pub code: ErrorCode,
    /// Present only when the server responded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ErrorResponse>,
    #[serde(skip)]
    #[source]
    source: Option<ErrorSource>,
}

/// What the server sent back with a failing status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub data: ErrorBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ErrorDetail>,
}

/// The `detail` field of an error body.
///
/// Servers send either a plain string or a list of field-level validation
/// issues. Anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
    Other(Value),
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub msg: String,
    #[serde(default)]
    pub loc: Vec<LocationSegment>,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Element of a validation location path: a field name or a list index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationSegment {
    Index(i64),
    Field(String),
}

impl std::fmt::Display for LocationSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{}", i),
            Self::Field(name) => f.write_str(name),
        }
    }
}

impl ValidationIssue {
    /// Dotted location, e.g. `body.degrees.0`
    pub fn path(&self) -> String {
        self.loc
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl ErrorDetail {
    /// Parse the `detail` field out of a decoded error body
    pub fn from_body(body: &Value) -> Option<Self> {
        let detail = body.get("detail")?;
        if detail.is_null() {
            return None;
        }
        serde_json::from_value(detail.clone()).ok()
    }

    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_validation(&self) -> Option<&[ValidationIssue]> {
        match self {
            Self::Validation(issues) => Some(issues),
            _ => None,
        }
    }
}

impl ApiError {
    /// Create a new error without a server response
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            response: None,
            source: None,
        }
    }

    /// Attach the server response
    pub fn with_response(mut self, status: u16, detail: Option<ErrorDetail>) -> Self {
        self.response = Some(ErrorResponse {
            status,
            data: ErrorBody { detail },
        });
        self
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, source: ErrorSource) -> Self {
        self.source = Some(source);
        self
    }

    /// HTTP status, if the server responded
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Raw `detail` payload, if the server sent one
    pub fn detail(&self) -> Option<&ErrorDetail> {
        self.response.as_ref().and_then(|r| r.data.detail.as_ref())
    }
}
