use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes carried by every normalized client error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Server answered 401
    Unauthorized,

    /// Server answered 403
    Forbidden,

    /// Server answered 404
    NotFound,

    /// Server rejected the payload (422)
    ValidationError,

    /// Server answered 500
    ServerError,

    /// Request was sent but no response arrived
    NetworkError,

    /// Anything else
    #[default]
    UnknownError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCode {
    /// Symbolic tag, as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ServerError => "SERVER_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Map an HTTP status to its code. Statuses outside the table yield `None`.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            422 => Some(Self::ValidationError),
            500 => Some(Self::ServerError),
            _ => None,
        }
    }
}
