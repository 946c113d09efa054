//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::TimelineSettings;
use crate::db::repository::ScheduledItemRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of truth for scheduled items
    pub repository: Arc<dyn ScheduledItemRepository>,
    /// Defaults for timeline requests that omit them
    pub timeline: TimelineSettings,
}

impl AppState {
    pub fn new(repository: Arc<dyn ScheduledItemRepository>, timeline: TimelineSettings) -> Self {
        Self {
            repository,
            timeline,
        }
    }
}
