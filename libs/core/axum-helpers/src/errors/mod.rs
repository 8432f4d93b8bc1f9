pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::error::Error as StdError;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Error body shared by every failure response.
///
/// Only the fields relevant to the error kind are serialized:
///
/// ```json
/// { "error": "product with id 9 was not found", "status": 404 }
/// { "errors": ["Field 'name' size must be between 2 and 20"] }
/// { "message": "database access error", "error": "connection refused: timed out" }
/// ```
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// One `Field '<name>' <reason>` entry per violated constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    /// `{message}`
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// `{error, status}`
    pub fn error(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            status: Some(status.as_u16()),
            ..Self::default()
        }
    }

    /// `{errors}`
    pub fn field_errors(errors: Vec<String>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::default()
        }
    }

    /// `{message, error}`
    pub fn detailed(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Application error type rendered as an HTTP response.
///
/// Each variant is bound to exactly one status code and body shape. Domain
/// crates convert their own errors into this type; anything they cannot
/// classify goes to [`AppError::Unexpected`].
#[derive(Debug, Error)]
pub enum AppError {
    /// 404 `{message}`
    #[error("{0}")]
    EmptyPage(String),

    /// 400 `{message}`
    #[error("{0}")]
    InvalidPage(String),

    /// 204 `{message}`
    #[error("{0}")]
    NoContent(String),

    /// 404 `{error, status}`
    #[error("{0}")]
    NotFound(String),

    /// 400 `{error, status}`
    #[error("{0}")]
    AlreadyExists(String),

    /// 400 `{errors}`
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// 400 `{errors}` with the parser's message
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// 400 `{error, status}`
    #[error("{0}")]
    BadRequest(String),

    /// 500 `{message: "database access error", error: <detail>}`
    #[error("database access error: {0}")]
    DataAccess(String),

    /// 500 `{error: "unexpected error: <msg>", status}`
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::EmptyPage(_) => ErrorCode::EmptyPage,
            AppError::InvalidPage(_) => ErrorCode::InvalidPage,
            AppError::NoContent(_) => ErrorCode::NoContent,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::MalformedBody(_) => ErrorCode::InvalidJson,
            AppError::BadRequest(_) => ErrorCode::InvalidPathParameter,
            AppError::DataAccess(_) => ErrorCode::DataAccess,
            AppError::Unexpected(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_messages(&errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.error_code();

        let (status, body) = match self {
            AppError::EmptyPage(msg) => {
                tracing::info!(error_code = code.code(), "Empty page: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::message(msg))
            }
            AppError::InvalidPage(msg) => {
                tracing::info!(error_code = code.code(), "Invalid page: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::message(msg))
            }
            AppError::NoContent(msg) => {
                tracing::info!(error_code = code.code(), "No content: {}", msg);
                (StatusCode::NO_CONTENT, ErrorResponse::message(msg))
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::error(StatusCode::NOT_FOUND, msg),
                )
            }
            AppError::AlreadyExists(msg) => {
                tracing::info!(error_code = code.code(), "Already exists: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::error(StatusCode::BAD_REQUEST, msg),
                )
            }
            AppError::Validation(errors) => {
                tracing::info!(error_code = code.code(), ?errors, "Validation error");
                (StatusCode::BAD_REQUEST, ErrorResponse::field_errors(errors))
            }
            AppError::MalformedBody(msg) => {
                tracing::info!(error_code = code.code(), "Malformed body: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::field_errors(vec![msg]))
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = code.code(), "Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::error(StatusCode::BAD_REQUEST, msg),
                )
            }
            AppError::DataAccess(detail) => {
                tracing::error!(error_code = code.code(), "Data access error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::detailed(code.default_message(), detail),
                )
            }
            AppError::Unexpected(msg) => {
                tracing::error!(error_code = code.code(), "Unexpected error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("{}: {}", code.default_message(), msg),
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Flatten validator output into sorted `Field '<name>' <reason>` lines.
///
/// The reason is the constraint's custom message, or its code when none was
/// given.
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |err| {
                let reason = err
                    .message
                    .as_deref()
                    .map(str::to_owned)
                    .unwrap_or_else(|| err.code.to_string());
                format!("Field '{}' {}", field, reason)
            })
        })
        .collect();

    messages.sort();
    messages
}

/// Innermost error in a `source()` chain; `err` itself when it has none.
pub fn root_cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current
}
