use crate::error::JobResult;
use crate::jobs::traits::{EnqueueRequest, JobHandle, JobQueue};
use common::{IndexTask, SiteConfiguration, INDEXING_TIMEOUT};
use std::sync::Arc;
use std::time::Duration;

/// Submits the index rebuild under the fixed job identity.
///
/// Does not wait for the rebuild. Duplicate suppression is left to the
/// job queue, which refuses a new job while one is pending.
pub struct ReindexTrigger<T: JobQueue + ?Sized> {
    queue: Arc<T>,
    job_id: String,
    timeout: Duration,
}

impl<T: JobQueue + ?Sized> Clone for ReindexTrigger<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            job_id: self.job_id.clone(),
            timeout: self.timeout,
        }
    }
}

impl<T: JobQueue + ?Sized> ReindexTrigger<T> {
    pub fn new(queue: Arc<T>, job_id: impl Into<String>) -> Self {
        Self {
            queue,
            job_id: job_id.into(),
            timeout: INDEXING_TIMEOUT,
        }
    }

    pub async fn trigger(&self, sites: &[SiteConfiguration]) -> JobResult<JobHandle> {
        let request = EnqueueRequest {
            job_id: self.job_id.clone(),
            task: IndexTask::rebuild(sites.to_vec()),
            timeout: self.timeout,
        };

        let handle = self.queue.enqueue(request).await?;

        if handle.created {
            tracing::info!(
                job_id = %handle.job_id,
                sites = sites.len(),
                timeout_secs = self.timeout.as_secs(),
                "Enqueued index rebuild"
            );
        } else {
            tracing::info!(job_id = %handle.job_id, "Index rebuild already pending");
        }

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::mock::MockJobQueue;
    use common::JobStatus;

    fn sites() -> Vec<SiteConfiguration> {
        vec![SiteConfiguration {
            url: "https://docs.example.com".to_string(),
            index_name: "docs".to_string(),
            extra: Default::default(),
        }]
    }

    #[tokio::test]
    async fn test_trigger_enqueues_with_fixed_identity() {
        let mock = Arc::new(MockJobQueue::new());
        let trigger = ReindexTrigger::new(Arc::clone(&mock), "index");

        let handle = trigger.trigger(&sites()).await.unwrap();

        assert!(handle.created);
        assert_eq!(handle.job_id, "index");

        let enqueued = mock.enqueued();
        assert_eq!(enqueued.len(), 1);
        assert_eq!(enqueued[0].job_id, "index");
        assert_eq!(enqueued[0].timeout, Duration::from_secs(3600));
        assert_eq!(enqueued[0].task, IndexTask::rebuild(sites()));
    }

    #[tokio::test]
    async fn test_trigger_while_pending() {
        let mock = Arc::new(MockJobQueue::new());
        mock.set_status("index", JobStatus::Started);
        let trigger = ReindexTrigger::new(Arc::clone(&mock), "index");

        let handle = trigger.trigger(&sites()).await.unwrap();

        assert!(!handle.created);
        assert!(mock.enqueued().is_empty());
    }

    #[tokio::test]
    async fn test_trigger_propagates_enqueue_failure() {
        let mock = Arc::new(MockJobQueue::new());
        mock.fail_enqueue_with("READONLY You can't write against a read only replica");
        let trigger = ReindexTrigger::new(Arc::clone(&mock), "index");

        assert!(trigger.trigger(&sites()).await.is_err());
    }
}
