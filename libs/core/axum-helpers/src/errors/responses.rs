//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Field validation failed or body is malformed",
    content_type = "application/json",
    example = json!({
        "errors": [
            "Field 'name' size must be between 2 and 20",
            "Field 'price' must be greater than or equal to 0"
        ]
    })
)]
pub struct ValidationErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid path parameter or duplicate resource",
    content_type = "application/json",
    example = json!({
        "error": "product with name 'Laptop' already exists",
        "status": 400
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "product with id 9 was not found",
        "status": 404
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Requested page is beyond the last page",
    content_type = "application/json",
    example = json!({
        "message": "no products on page 3"
    })
)]
pub struct EmptyPageResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Page index is negative or not a number",
    content_type = "application/json",
    example = json!({
        "message": "invalid page number"
    })
)]
pub struct InvalidPageResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - Data access failure or unexpected error",
    content_type = "application/json",
    example = json!({
        "message": "database access error",
        "error": "Connection Error: connection refused"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
