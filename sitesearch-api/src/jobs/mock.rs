use crate::error::{JobError, JobResult};
use crate::jobs::traits::{EnqueueRequest, JobHandle, JobQueue};
use async_trait::async_trait;
use common::JobStatus;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock implementation of JobQueue for unit testing
///
/// Enqueue follows the same rule as the Redis client: a pending job under
/// the same identity blocks a new one.
#[derive(Clone)]
pub struct MockJobQueue {
    jobs: Arc<Mutex<HashMap<String, JobStatus>>>,
    started: Arc<Mutex<HashSet<String>>>,
    enqueued: Arc<Mutex<Vec<EnqueueRequest>>>,
    enqueue_calls: Arc<Mutex<usize>>,
    fetch_error: Arc<Mutex<Option<String>>>,
    registry_error: Arc<Mutex<Option<String>>>,
    enqueue_error: Arc<Mutex<Option<String>>>,
}

impl MockJobQueue {
    /// Create a new mock with no jobs
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(Mutex::new(HashMap::new())),
            started: Arc::new(Mutex::new(HashSet::new())),
            enqueued: Arc::new(Mutex::new(Vec::new())),
            enqueue_calls: Arc::new(Mutex::new(0)),
            fetch_error: Arc::new(Mutex::new(None)),
            registry_error: Arc::new(Mutex::new(None)),
            enqueue_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Store a job record with the given status
    pub fn set_status(&self, job_id: &str, status: JobStatus) {
        self.jobs
            .lock()
            .unwrap()
            .insert(job_id.to_string(), status);
    }

    /// Put a job id in the started registry without a fetchable record
    pub fn add_started(&self, job_id: &str) {
        self.started.lock().unwrap().insert(job_id.to_string());
    }

    /// Make every fetch fail with a transport error
    pub fn fail_fetch_with(&self, message: &str) {
        *self.fetch_error.lock().unwrap() = Some(message.to_string());
    }

    /// Make every started registry read fail with a transport error
    pub fn fail_registry_with(&self, message: &str) {
        *self.registry_error.lock().unwrap() = Some(message.to_string());
    }

    /// Make every enqueue fail with a transport error
    pub fn fail_enqueue_with(&self, message: &str) {
        *self.enqueue_error.lock().unwrap() = Some(message.to_string());
    }

    /// Requests that resulted in a new job
    pub fn enqueued(&self) -> Vec<EnqueueRequest> {
        self.enqueued.lock().unwrap().clone()
    }

    /// Every enqueue call, including refused ones
    pub fn enqueue_calls(&self) -> usize {
        *self.enqueue_calls.lock().unwrap()
    }
}

impl Default for MockJobQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobQueue for MockJobQueue {
    async fn fetch_status(&self, job_id: &str) -> JobResult<JobStatus> {
        if let Some(message) = self.fetch_error.lock().unwrap().clone() {
            return Err(JobError::Redis(message));
        }

        self.jobs
            .lock()
            .unwrap()
            .get(job_id)
            .copied()
            .ok_or_else(|| JobError::NoSuchJob(job_id.to_string()))
    }

    async fn started_job_ids(&self) -> JobResult<Vec<String>> {
        if let Some(message) = self.registry_error.lock().unwrap().clone() {
            return Err(JobError::Redis(message));
        }

        Ok(self.started.lock().unwrap().iter().cloned().collect())
    }

    async fn enqueue(&self, request: EnqueueRequest) -> JobResult<JobHandle> {
        *self.enqueue_calls.lock().unwrap() += 1;

        if let Some(message) = self.enqueue_error.lock().unwrap().clone() {
            return Err(JobError::Redis(message));
        }

        let mut jobs = self.jobs.lock().unwrap();

        if jobs.get(&request.job_id).is_some_and(JobStatus::is_pending) {
            return Ok(JobHandle {
                job_id: request.job_id,
                created: false,
            });
        }

        jobs.insert(request.job_id.clone(), JobStatus::Queued);
        let job_id = request.job_id.clone();
        self.enqueued.lock().unwrap().push(request);

        Ok(JobHandle {
            job_id,
            created: true,
        })
    }
}
