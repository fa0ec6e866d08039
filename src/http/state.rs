//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::EngineSettings;
use crate::db::repository::FullRepository;
use crate::services::job_tracker::JobTracker;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Engine thresholds
    pub config: Arc<EngineSettings>,
    /// Tracker for background recompute jobs
    pub job_tracker: JobTracker,
}

impl AppState {
    /// Create a new application state with the given repository and config.
    pub fn new(repository: Arc<dyn FullRepository>, config: EngineSettings) -> Self {
        Self {
            repository,
            config: Arc::new(config),
            job_tracker: JobTracker::new(),
        }
    }
}
