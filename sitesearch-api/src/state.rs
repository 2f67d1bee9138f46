use crate::health::HealthCheck;
use crate::jobs::JobQueue;
use crate::search::SearchClient;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Built once at startup; clients are owned here rather than in globals.
#[derive(Clone)]
pub struct AppState {
    pub health: Arc<HealthCheck<dyn JobQueue, dyn SearchClient>>,
}

impl AppState {
    pub fn new(health: Arc<HealthCheck<dyn JobQueue, dyn SearchClient>>) -> Self {
        Self { health }
    }
}
