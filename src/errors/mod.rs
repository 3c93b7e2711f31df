//! Normalized error handling for API responses

pub mod codes;
pub mod normalize;
pub mod response;

pub use codes::ErrorCode;
pub use normalize::RequestFailure;
pub use response::{
    ApiError, ErrorBody, ErrorDetail, ErrorResponse, ErrorSource, LocationSegment,
    ValidationIssue,
};
