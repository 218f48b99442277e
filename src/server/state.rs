//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into each handler through Axum's
//! state extraction. Every field is cheap to clone:
//! - `DatabaseConnection` is a connection pool (clones share the pool)
//! - `SessionLocks` and the filter strategy are reference counted

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::service::{
    calendar::filter::CalendarFilterStrategy, waiting_list::SessionLocks,
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Per-session locks serializing enrollment and waiting-list changes.
    pub session_locks: SessionLocks,

    /// Strategy used by `calendar/getFilter`, selected by configuration.
    pub calendar_filter: Arc<dyn CalendarFilterStrategy>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `calendar_filter` - Strategy applied when filtering calendars
    ///
    /// # Returns
    /// - `AppState` - Initialized application state with empty session locks
    pub fn new(db: DatabaseConnection, calendar_filter: Arc<dyn CalendarFilterStrategy>) -> Self {
        Self {
            db,
            session_locks: SessionLocks::new(),
            calendar_filter,
        }
    }
}
