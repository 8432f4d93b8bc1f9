//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Producto Service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Producto Service",
        version = "0.1.0",
        description = "Product catalogue CRUD with validation and paging",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/producto-service", api = domain_products::ApiDoc)
    )
)]
pub struct ApiDoc;
