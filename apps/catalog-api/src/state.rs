//! Application state management.
//!
//! Shared by the route builders and the readiness handler.

use sea_orm::DatabaseConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection is a handle to a shared pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from the settings file and environment
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
}
