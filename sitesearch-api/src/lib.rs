pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod jobs;
pub mod search;
pub mod server;
pub mod sites;
pub mod state;

// Re-exports for convenience
pub use config::Config;
pub use error::{ApiError, ApiResult, JobError, SearchError};
pub use health::{HealthCheck, NotReadyReason, Verdict};
pub use state::AppState;
