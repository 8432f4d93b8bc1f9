//! Custom extractors for Axum handlers.
//!
//! Both extractors reject through [`AppError`](crate::errors::AppError), so a
//! bad request body or path looks the same from every handler.

pub mod parsed_path;
pub mod validated_json;

pub use parsed_path::ParsedPath;
pub use validated_json::ValidatedJson;
