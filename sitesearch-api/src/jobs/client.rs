use crate::error::{JobError, JobResult};
use crate::jobs::traits::{EnqueueRequest, JobHandle, JobQueue};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use common::{IndexTask, JobStatus};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use redis::aio::ConnectionManager;
use std::io::Write;
use tokio::sync::OnceCell;

const QUEUES_KEY: &str = "rq:queues";

/// Job system client speaking the RQ key layout in Redis
///
/// - `rq:job:<id>` hash holding the job record
/// - `rq:queue:<name>` list of job ids waiting for a worker
/// - `rq:wip:<name>` started registry, scored by expiry timestamp
///
/// The `data` field is zlib-compressed JSON, so workers must run with RQ's
/// `JSONSerializer`.
pub struct RedisJobQueue {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
    queue: String,
}

impl RedisJobQueue {
    pub fn new(redis_url: &str, queue: impl Into<String>) -> JobResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self::from_client(client, queue))
    }

    /// Create a job queue from an explicit redis::Client
    pub fn from_client(client: redis::Client, queue: impl Into<String>) -> Self {
        Self {
            client,
            conn: OnceCell::new(),
            queue: queue.into(),
        }
    }

    /// Shared connection, opened on first use and reconnected by the manager
    async fn connection(&self) -> JobResult<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;

        Ok(conn.clone())
    }

    pub fn job_key(job_id: &str) -> String {
        format!("rq:job:{}", job_id)
    }

    pub fn queue_key(&self) -> String {
        format!("rq:queue:{}", self.queue)
    }

    pub fn started_registry_key(&self) -> String {
        format!("rq:wip:{}", self.queue)
    }
}

/// Encode the task call the way an RQ worker loads it
fn encode_job_data(task: &IndexTask) -> JobResult<Vec<u8>> {
    let payload = serde_json::to_vec(&task.call_payload())?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&payload)?;
    Ok(encoder.finish()?)
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn fetch_status(&self, job_id: &str) -> JobResult<JobStatus> {
        let mut conn = self.connection().await?;
        let key = Self::job_key(job_id);

        let (exists, status): (bool, Option<String>) = redis::pipe()
            .exists(&key)
            .hget(&key, "status")
            .query_async(&mut conn)
            .await?;

        if !exists {
            return Err(JobError::NoSuchJob(job_id.to_string()));
        }

        let status = status
            .ok_or_else(|| JobError::Malformed(format!("job {} has no status", job_id)))?;

        status
            .parse()
            .map_err(|e: common::CommonError| JobError::Malformed(e.to_string()))
    }

    async fn started_job_ids(&self) -> JobResult<Vec<String>> {
        let mut conn = self.connection().await?;

        // Entries whose score is in the past belong to dead workers
        let now = Utc::now().timestamp();
        let ids: Vec<String> = redis::cmd("ZRANGEBYSCORE")
            .arg(self.started_registry_key())
            .arg(now)
            .arg("+inf")
            .query_async(&mut conn)
            .await?;

        Ok(ids)
    }

    async fn enqueue(&self, request: EnqueueRequest) -> JobResult<JobHandle> {
        // WATCH state is per connection, so this cannot use the shared one
        let mut conn = self.client.get_async_connection().await?;
        let key = Self::job_key(&request.job_id);

        let _: () = redis::cmd("WATCH").arg(&key).query_async(&mut conn).await?;

        let current: Option<String> = redis::cmd("HGET")
            .arg(&key)
            .arg("status")
            .query_async(&mut conn)
            .await?;

        let pending = current
            .as_deref()
            .and_then(|status| status.parse::<JobStatus>().ok())
            .filter(JobStatus::is_pending);

        if let Some(status) = pending {
            let _: () = redis::cmd("UNWATCH").query_async(&mut conn).await?;
            tracing::debug!(
                job_id = %request.job_id,
                %status,
                "Job already pending, not enqueuing"
            );
            return Ok(JobHandle {
                job_id: request.job_id,
                created: false,
            });
        }

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let fields = [
            ("status", JobStatus::Queued.to_string()),
            ("origin", self.queue.clone()),
            ("created_at", now.clone()),
            ("enqueued_at", now),
            ("timeout", request.timeout.as_secs().to_string()),
            ("description", request.task.description()),
        ];
        let data = encode_job_data(&request.task)?;

        let queue_key = self.queue_key();
        let committed: Option<(i64,)> = redis::pipe()
            .atomic()
            .del(&key)
            .ignore()
            .hset_multiple(&key, &fields)
            .ignore()
            .hset(&key, "data", data)
            .ignore()
            .sadd(QUEUES_KEY, &queue_key)
            .ignore()
            .rpush(&queue_key, &request.job_id)
            .query_async(&mut conn)
            .await?;

        match committed {
            Some((queue_len,)) => {
                tracing::debug!(job_id = %request.job_id, queue_len, "Job record written");
                Ok(JobHandle {
                    job_id: request.job_id,
                    created: true,
                })
            }
            None => {
                // EXEC aborted: the record changed under WATCH, another request got there first
                tracing::debug!(job_id = %request.job_id, "Concurrent enqueue detected");
                Ok(JobHandle {
                    job_id: request.job_id,
                    created: false,
                })
            }
        }
    }
}
