//! Single path parameter parsed through `FromStr`.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use std::str::FromStr;

/// Extractor for a single typed path parameter.
///
/// Unlike `Path<T>`, a value that fails to parse is rejected with the
/// standard 400 `{"error", "status"}` body.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::ParsedPath;
///
/// async fn get_product(ParsedPath(id): ParsedPath<i64>) -> String {
///     format!("Product: {}", id)
/// }
///
/// let app = Router::new().route("/productos/{id}", get(get_product));
/// ```
pub struct ParsedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ParsedPath<T>
where
    T: FromStr,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        raw.parse::<T>().map(ParsedPath).map_err(|_| {
            AppError::BadRequest(format!("invalid path parameter '{}'", raw)).into_response()
        })
    }
}
