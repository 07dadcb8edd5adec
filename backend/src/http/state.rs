//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::RegenerationController;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage reads
    pub repository: Arc<dyn FullRepository>,
    /// Sole writer of the persisted timetable
    pub controller: Arc<RegenerationController>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(repository: Arc<dyn FullRepository>, controller: Arc<RegenerationController>) -> Self {
        Self {
            repository,
            controller,
        }
    }
}
