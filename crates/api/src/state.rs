use std::sync::Arc;

use qa_history_core::history::HistoryConfig;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: qa_history_db::DbPool,
    /// Server configuration (bind address, CORS, JWT).
    pub config: Arc<ServerConfig>,
    /// Censoring, date display, diff limits and permission levels.
    pub history: Arc<HistoryConfig>,
}
