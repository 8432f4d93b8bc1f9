//! HTTP handlers for the Productos API

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, ParsedPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, EmptyPageResponse, InternalServerErrorResponse, InvalidPageResponse,
        NotFoundResponse, ValidationErrorResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, MessageResponse, Product, ProductKey, ProductPage, ProductResponse,
    UpdateProduct, parse_page_index,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Productos API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        list_page,
        get_product,
        create_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, ProductKey,
            ProductPage, ProductResponse, MessageResponse
        ),
        responses(
            ValidationErrorResponse,
            BadRequestResponse,
            NotFoundResponse,
            EmptyPageResponse,
            InvalidPageResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Productos", description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the productos router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/productos",
            get(list_products)
                .post(create_product)
                .put(update_product)
                .delete(delete_product),
        )
        .route("/productos/{id}", get(get_product))
        .route("/producto/page/{page}", get(list_page))
        .with_state(shared_service)
}

/// List every product ordered by id
#[utoipa::path(
    get,
    path = "/productos",
    tag = "Productos",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 204, description = "No products exist"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// List one zero-based page of four products
#[utoipa::path(
    get,
    path = "/producto/page/{page}",
    tag = "Productos",
    params(
        ("page" = u64, Path, description = "Zero-based page index")
    ),
    responses(
        (status = 200, description = "Requested page", body = ProductPage),
        (status = 400, response = InvalidPageResponse),
        (status = 404, response = EmptyPageResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_page<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ParsedPath(raw): ParsedPath<String>,
) -> ProductResult<Json<ProductPage>> {
    let page = parse_page_index(&raw)?;
    let result = service.list_page(page).await?;
    Ok(Json(result))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/productos/{id}",
    tag = "Productos",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ParsedPath(id): ParsedPath<i64>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/productos",
    tag = "Productos",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;

    AuditEvent::new(
        "product.create",
        Some(format!("product:{}", product.id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({ "name": product.name }))
    .log();

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "product created successfully".to_string(),
            product,
        }),
    ))
}

/// Replace a product; the body carries the id
#[utoipa::path(
    put,
    path = "/productos",
    tag = "Productos",
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.update_product(input).await?;

    AuditEvent::new(
        "product.update",
        Some(format!("product:{}", product.id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({ "name": product.name, "stock": product.stock }))
    .log();

    Ok(Json(ProductResponse {
        message: "product updated successfully".to_string(),
        product,
    }))
}

/// Delete a product; the body carries the id
#[utoipa::path(
    delete,
    path = "/productos",
    tag = "Productos",
    request_body = ProductKey,
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, response = ValidationErrorResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    ValidatedJson(key): ValidatedJson<ProductKey>,
) -> ProductResult<Json<MessageResponse>> {
    let id = key.required_id()?;
    service.delete_product(id).await?;

    AuditEvent::new("product.delete", Some(format!("product:{}", id)), AuditOutcome::Success)
        .with_request_headers(&headers)
        .log();

    Ok(Json(MessageResponse {
        message: "product deleted successfully".to_string(),
    }))
}
