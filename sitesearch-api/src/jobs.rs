// Module declarations for job system abstractions
pub mod client;
pub mod mock;
pub mod tracker;
pub mod traits;
pub mod trigger;

// Re-exports for convenience
pub use client::RedisJobQueue;
pub use mock::MockJobQueue;
pub use tracker::{JobState, JobStatusTracker};
pub use traits::{EnqueueRequest, JobHandle, JobQueue};
pub use trigger::ReindexTrigger;
