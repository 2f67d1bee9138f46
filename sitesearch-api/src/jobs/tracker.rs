use crate::error::{JobError, JobResult};
use crate::jobs::traits::JobQueue;
use common::JobStatus;
use std::sync::Arc;

/// Lifecycle of the rebuild job as seen by the readiness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// No record and no registry entry
    NotStarted,
    /// Waiting for or running on a worker
    InProgress,
    /// Ran to an end state; carries the native status
    Settled(JobStatus),
}

/// Resolves the state of the rebuild job from the job system
///
/// A job can be in the started registry before its record is readable by
/// id. Registry membership is therefore checked whenever the fetch reports
/// that no record exists.
pub struct JobStatusTracker<T: JobQueue + ?Sized> {
    queue: Arc<T>,
    job_id: String,
}

impl<T: JobQueue + ?Sized> Clone for JobStatusTracker<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            job_id: self.job_id.clone(),
        }
    }
}

impl<T: JobQueue + ?Sized> JobStatusTracker<T> {
    pub fn new(queue: Arc<T>, job_id: impl Into<String>) -> Self {
        Self {
            queue,
            job_id: job_id.into(),
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Resolve the current job state.
    ///
    /// Only `JobError::NoSuchJob` is absorbed; every other error propagates.
    pub async fn resolve(&self) -> JobResult<JobState> {
        match self.queue.fetch_status(&self.job_id).await {
            Ok(status) if status.is_pending() => Ok(JobState::InProgress),
            Ok(status) => Ok(JobState::Settled(status)),
            Err(JobError::NoSuchJob(_)) => {
                let started = self.queue.started_job_ids().await?;

                if started.iter().any(|id| id == &self.job_id) {
                    tracing::debug!(
                        job_id = %self.job_id,
                        "Job in started registry but not yet fetchable"
                    );
                    Ok(JobState::InProgress)
                } else {
                    Ok(JobState::NotStarted)
                }
            }
            Err(e) => Err(e),
        }
    }
}
