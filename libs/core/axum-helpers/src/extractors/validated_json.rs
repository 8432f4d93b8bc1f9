//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Rejects with 400 `{"errors": [...]}` before the handler runs, either with
/// the parser's message for a malformed body or with one
/// `Field '<name>' <reason>` line per violated constraint.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 2, max = 20))]
///     name: String,
///     #[validate(range(min = 0.0))]
///     price: f64,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateProduct>) -> String {
///     format!("Creating: {}", payload.name)
/// }
///
/// let app = Router::new().route("/productos", post(create));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::{Request as HttpRequest, StatusCode, header}, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 2, max = 20, message = "size must be between 2 and 20"))]
        name: String,
        #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
        stock: i32,
    }

    async fn echo(ValidatedJson(payload): ValidatedJson<Payload>) -> String {
        format!("{}:{}", payload.name, payload.stock)
    }

    async fn post_json(body: &str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/", post(echo));
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_payload_reaches_handler() {
        let (status, body) = post_json(r#"{"name":"Desk","stock":3}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Desk:3");
    }

    #[tokio::test]
    async fn test_invalid_payload_lists_every_violation() {
        let (status, body) = post_json(r#"{"name":"D","stock":-1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({"errors": [
                "Field 'name' size must be between 2 and 20",
                "Field 'stock' must be greater than or equal to 0"
            ]})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_uses_errors_list() {
        let (status, body) = post_json(r#"{"name":"Desk","#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&body).unwrap();
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
    }
}
