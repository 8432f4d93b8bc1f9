//! Application state management

use database::postgres::DatabaseConnection;

/// Shared application state
///
/// Cloning is cheap; the connection is a pooled handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
