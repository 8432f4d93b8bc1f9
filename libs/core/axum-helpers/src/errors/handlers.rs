use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;

use super::{AppError, ErrorCode, ErrorResponse};

/// Fallback for requests that match no route.
pub async fn not_found() -> Response {
    let code = ErrorCode::RouteNotFound;
    tracing::info!(error_code = code.code(), "No route matched");

    let body = Json(ErrorResponse::error(
        StatusCode::NOT_FOUND,
        code.default_message(),
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Fallback for a matched path whose method router has no handler for the request method.
pub async fn method_not_allowed() -> Response {
    let code = ErrorCode::MethodNotAllowed;
    tracing::info!(error_code = code.code(), "Method not allowed");

    let body = Json(ErrorResponse::error(
        StatusCode::METHOD_NOT_ALLOWED,
        code.default_message(),
    ));

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}

/// Response for a panicking handler, for use with `CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        ErrorCode::Panic.default_message().to_string()
    };

    tracing::error!(error_code = ErrorCode::Panic.code(), "Handler panicked: {}", detail);

    AppError::Unexpected(detail).into_response()
}
