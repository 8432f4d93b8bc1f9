//! Type-safe error codes for structured logging.
//!
//! Every [`AppError`](super::AppError) mapping logs one of these codes in its
//! `error_code` field so failures can be counted and alerted on without
//! parsing messages.
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::DataAccess;
//! assert_eq!(code.as_str(), "DATA_ACCESS");
//! assert_eq!(code.code(), 2001);
//! assert_eq!(code.default_message(), "database access error");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// One or more request fields violated a constraint
    ValidationError,

    /// Request body could not be parsed as JSON
    InvalidJson,

    /// A path segment could not be parsed into the expected type
    InvalidPathParameter,

    /// Page index was negative or not a number
    InvalidPage,

    /// Requested resource does not exist
    NotFound,

    /// Resource with the same natural key already exists
    AlreadyExists,

    /// Requested page lies beyond the last page
    EmptyPage,

    /// Collection is empty
    NoContent,

    /// No route matched the request
    RouteNotFound,

    /// Route exists but does not accept the request method
    MethodNotAllowed,

    // Data-access errors (2000-2999)
    /// Query or connection failure in the persistence layer
    DataAccess,

    // Server errors (5000-5999)
    /// Unclassified failure
    InternalError,

    /// Handler panicked
    Panic,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidPathParameter => "INVALID_PATH_PARAMETER",
            Self::InvalidPage => "INVALID_PAGE",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::EmptyPage => "EMPTY_PAGE",
            Self::NoContent => "NO_CONTENT",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::DataAccess => "DATA_ACCESS",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Panic => "PANIC",
        }
    }

    /// Integer code for logs and metrics.
    ///
    /// Ranges:
    /// - 1000-1999: client errors
    /// - 2000-2999: data-access errors
    /// - 5000-5999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidJson => 1002,
            Self::InvalidPathParameter => 1003,
            Self::InvalidPage => 1004,
            Self::NotFound => 1005,
            Self::AlreadyExists => 1006,
            Self::EmptyPage => 1007,
            Self::NoContent => 1008,
            Self::RouteNotFound => 1009,
            Self::MethodNotAllowed => 1010,

            Self::DataAccess => 2001,

            Self::InternalError => 5001,
            Self::Panic => 5002,
        }
    }

    /// Message used when the caller has nothing more specific to say.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidJson => "Invalid JSON format",
            Self::InvalidPathParameter => "Invalid path parameter",
            Self::InvalidPage => "invalid page number",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::EmptyPage => "Requested page is empty",
            Self::NoContent => "No content",
            Self::RouteNotFound => "resource not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::DataAccess => "database access error",
            Self::InternalError => "unexpected error",
            Self::Panic => "handler panicked",
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.code() >= 2000
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
