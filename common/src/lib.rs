// Re-export commonly used items
pub mod error;
pub mod job;
pub mod types;

// Convenience re-exports
pub use error::CommonError;
pub use job::{JobStatus, DEFAULT_QUEUE, INDEXING_TIMEOUT, JOB_ID};
pub use types::{IndexTask, SiteConfiguration, SitesFile};
