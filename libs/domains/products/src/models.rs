use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{ProductError, ProductResult};

/// Products per page on the paginated listing
pub const PAGE_SIZE: u64 = 4;

const REQUIRED: &str = "must not be null";

fn validate_not_empty(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("not_empty");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Server-assigned identifier
    pub id: i64,
    /// Unique across all products
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: i64, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field; `id` and `created_at` are kept.
    pub fn apply_update(&mut self, input: UpdateProduct) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.stock = input.stock;
        self.updated_at = Utc::now();
    }
}

/// Payload for creating a product. An `id` in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_empty"),
        length(min = 2, max = 20, message = "size must be between 2 and 20")
    )]
    #[schema(min_length = 2, max_length = 20, example = "Laptop")]
    pub name: String,

    #[validate(length(max = 255, message = "size must be between 0 and 255"))]
    #[schema(max_length = 255)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    #[schema(minimum = 0.0, example = 1299.9)]
    pub price: f64,

    #[serde(default)]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    #[schema(minimum = 0, example = 5)]
    pub stock: i32,
}

/// Payload for a full update; `id` selects the product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(required(message = "must not be null"))]
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(
        custom(function = "validate_not_empty"),
        length(min = 2, max = 20, message = "size must be between 2 and 20")
    )]
    #[schema(min_length = 2, max_length = 20)]
    pub name: String,

    #[validate(length(max = 255, message = "size must be between 0 and 255"))]
    #[schema(max_length = 255)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    #[schema(minimum = 0.0)]
    pub price: f64,

    #[serde(default)]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    #[schema(minimum = 0)]
    pub stock: i32,
}

impl UpdateProduct {
    pub fn required_id(&self) -> ProductResult<i64> {
        required_id(self.id)
    }
}

/// Delete payload. Other product fields in the body are accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductKey {
    #[validate(required(message = "must not be null"))]
    pub id: Option<i64>,
}

impl ProductKey {
    pub fn required_id(&self) -> ProductResult<i64> {
        required_id(self.id)
    }
}

fn required_id(id: Option<i64>) -> ProductResult<i64> {
    id.ok_or_else(|| ProductError::Validation(vec![format!("Field 'id' {}", REQUIRED)]))
}

/// One page of products, ordered by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub content: Vec<Product>,
    /// Zero-based index that was requested
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub has_next: bool,
}

impl ProductPage {
    pub fn new(content: Vec<Product>, page: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(size.max(1));
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            has_next: page.saturating_add(1) < total_pages,
        }
    }
}

/// Parse a page segment from the URL. Negative and non-numeric values are rejected.
pub fn parse_page_index(raw: &str) -> ProductResult<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ProductError::InvalidPage)
}

/// `{message, product}` body for create and update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub message: String,
    pub product: Product,
}

/// `{message}` body for delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
