use crate::error::JobResult;
use crate::jobs::{JobQueue, JobState, JobStatusTracker, ReindexTrigger};
use crate::search::{Availability, IndexAvailabilityChecker, IndexInfo, SearchClient};
use common::{JobStatus, SiteConfiguration, JOB_ID};
use std::sync::Arc;

/// Result of one readiness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Ready(IndexInfo),
    NotReady(NotReadyReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotReadyReason {
    /// The rebuild job is queued or running
    IndexingInProgress,
    /// The index was missing and this check enqueued a rebuild
    RebuildTriggered,
    /// The index was missing but another check's rebuild won the enqueue
    RebuildPending,
    /// The search engine failed for a reason other than a missing index
    SearchUnavailable(String),
}

impl NotReadyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotReadyReason::IndexingInProgress => "indexing_in_progress",
            NotReadyReason::RebuildTriggered => "rebuild_triggered",
            NotReadyReason::RebuildPending => "rebuild_pending",
            NotReadyReason::SearchUnavailable(_) => "search_unavailable",
        }
    }
}

/// Readiness decision for the search index
///
/// Each check recomputes the verdict from live signals:
/// 1. Resolve the rebuild job; in progress means not ready, and the search
///    engine is left alone.
/// 2. Ask the search engine for index metadata; success means ready.
/// 3. A missing index enqueues a rebuild. Any other search failure is
///    reported as not ready without a rebuild.
///
/// Job system failures other than "no such job" are returned as errors.
pub struct HealthCheck<Q: JobQueue + ?Sized, S: SearchClient + ?Sized> {
    tracker: JobStatusTracker<Q>,
    checker: IndexAvailabilityChecker<S>,
    trigger: ReindexTrigger<Q>,
    sites: Vec<SiteConfiguration>,
}

impl<Q: JobQueue + ?Sized, S: SearchClient + ?Sized> HealthCheck<Q, S> {
    pub fn new(queue: Arc<Q>, search: Arc<S>, sites: Vec<SiteConfiguration>) -> Self {
        Self {
            tracker: JobStatusTracker::new(Arc::clone(&queue), JOB_ID),
            checker: IndexAvailabilityChecker::new(search),
            trigger: ReindexTrigger::new(queue, JOB_ID),
            sites,
        }
    }

    pub async fn evaluate(&self) -> JobResult<Verdict> {
        let state = self.tracker.resolve().await?;

        match state {
            JobState::InProgress => {
                tracing::debug!(job_id = %self.tracker.job_id(), "Index rebuild in progress");
                return Ok(Verdict::NotReady(NotReadyReason::IndexingInProgress));
            }
            JobState::Settled(JobStatus::Failed) => {
                tracing::warn!(job_id = %self.tracker.job_id(), "Last index rebuild failed");
            }
            JobState::Settled(_) | JobState::NotStarted => {}
        }

        match self.checker.check().await {
            Availability::Available(info) => Ok(Verdict::Ready(info)),
            Availability::Unavailable(reason) => {
                tracing::error!(
                    index = %self.checker.index_name(),
                    %reason,
                    "Search index unavailable, requesting rebuild"
                );

                let handle = self.trigger.trigger(&self.sites).await?;
                let reason = if handle.created {
                    NotReadyReason::RebuildTriggered
                } else {
                    NotReadyReason::RebuildPending
                };

                Ok(Verdict::NotReady(reason))
            }
            Availability::Error(err) => {
                tracing::error!(
                    index = %self.checker.index_name(),
                    error = %err,
                    "Search engine check failed, not rebuilding"
                );
                Ok(Verdict::NotReady(NotReadyReason::SearchUnavailable(
                    err.to_string(),
                )))
            }
        }
    }
}
