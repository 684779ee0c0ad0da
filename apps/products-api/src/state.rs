//! Application state management

use sea_orm::DatabaseConnection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
