use crate::error::JobResult;
use async_trait::async_trait;
use common::{IndexTask, JobStatus};
use std::time::Duration;

/// A request to run the index task under a fixed job identity
#[derive(Debug, Clone, PartialEq)]
pub struct EnqueueRequest {
    pub job_id: String,
    pub task: IndexTask,
    pub timeout: Duration,
}

/// Result of an enqueue.
///
/// `created` is false when a pending job already held the identity and
/// nothing new was queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub job_id: String,
    pub created: bool,
}

/// Abstraction over the job system to enable testing with mocks
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Fetch the native status of a job.
    ///
    /// Returns `JobError::NoSuchJob` when no record exists under `job_id`.
    async fn fetch_status(&self, job_id: &str) -> JobResult<JobStatus>;

    /// Identities currently held in the started-job registry
    async fn started_job_ids(&self) -> JobResult<Vec<String>>;

    /// Submit a job under `request.job_id`, refusing if one is still pending
    async fn enqueue(&self, request: EnqueueRequest) -> JobResult<JobHandle>;
}
