//! Application state management

use database::postgres::DatabaseConnection;

/// Shared application state
///
/// Cloned into the readiness router; the connection pool is shared.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL pool, absent when products are kept in memory
    pub db: Option<DatabaseConnection>,
}
