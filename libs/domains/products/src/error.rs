use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use axum_helpers::errors::root_cause;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("no products on page {0}")]
    EmptyPage(u64),

    #[error("invalid page number")]
    InvalidPage,

    #[error("no products found")]
    NoProducts,

    #[error("product with id {0} was not found")]
    NotFound(i64),

    #[error("product with name '{0}' already exists")]
    AlreadyExists(String),

    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{message}: {cause}")]
    DataAccess { message: String, cause: String },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Like `From<DbErr>`, but a unique-constraint violation becomes
    /// [`ProductError::AlreadyExists`] for `name`.
    pub fn from_write(err: DbErr, name: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ProductError::AlreadyExists(name.to_string())
            }
            _ => err.into(),
        }
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        let cause = root_cause(&err).to_string();
        ProductError::DataAccess {
            message: err.to_string(),
            cause,
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        let message = err.to_string();
        match err {
            ProductError::EmptyPage(_) => AppError::EmptyPage(message),
            ProductError::InvalidPage => AppError::InvalidPage(message),
            ProductError::NoProducts => AppError::NoContent(message),
            ProductError::NotFound(_) => AppError::NotFound(message),
            ProductError::AlreadyExists(_) => AppError::AlreadyExists(message),
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::DataAccess { .. } => AppError::DataAccess(message),
            ProductError::Unexpected(msg) => AppError::Unexpected(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
