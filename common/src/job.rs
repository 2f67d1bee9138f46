use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Identity of the singleton index rebuild job.
///
/// Everything that enqueues, fetches or inspects the rebuild job must agree
/// on this key.
pub const JOB_ID: &str = "index";

/// Upper bound on how long a worker may spend running the index task.
pub const INDEXING_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Queue the rebuild job is pushed onto.
pub const DEFAULT_QUEUE: &str = "default";

/// Native job states as stored by the job system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Started,
    Deferred,
    Scheduled,
    Finished,
    Failed,
    Stopped,
    Canceled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Started => "started",
            JobStatus::Deferred => "deferred",
            JobStatus::Scheduled => "scheduled",
            JobStatus::Finished => "finished",
            JobStatus::Failed => "failed",
            JobStatus::Stopped => "stopped",
            JobStatus::Canceled => "canceled",
        }
    }

    /// True while the job is waiting for or holding a worker.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            JobStatus::Queued | JobStatus::Started | JobStatus::Deferred | JobStatus::Scheduled
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(JobStatus::Queued),
            "started" => Ok(JobStatus::Started),
            "deferred" => Ok(JobStatus::Deferred),
            "scheduled" => Ok(JobStatus::Scheduled),
            "finished" => Ok(JobStatus::Finished),
            "failed" => Ok(JobStatus::Failed),
            "stopped" => Ok(JobStatus::Stopped),
            // older queue versions spell it with two Ls
            "canceled" | "cancelled" => Ok(JobStatus::Canceled),
            other => Err(CommonError::UnknownJobStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_native_statuses() {
        assert_eq!("queued".parse::<JobStatus>().unwrap(), JobStatus::Queued);
        assert_eq!("started".parse::<JobStatus>().unwrap(), JobStatus::Started);
        assert_eq!("finished".parse::<JobStatus>().unwrap(), JobStatus::Finished);
        assert_eq!("failed".parse::<JobStatus>().unwrap(), JobStatus::Failed);
        assert_eq!("cancelled".parse::<JobStatus>().unwrap(), JobStatus::Canceled);
    }

    #[test]
    fn test_parse_unknown_status() {
        let result = "paused".parse::<JobStatus>();
        assert!(matches!(result, Err(CommonError::UnknownJobStatus(_))));
    }

    #[test]
    fn test_pending_statuses() {
        assert!(JobStatus::Queued.is_pending());
        assert!(JobStatus::Started.is_pending());
        assert!(JobStatus::Deferred.is_pending());
        assert!(JobStatus::Scheduled.is_pending());
        assert!(!JobStatus::Finished.is_pending());
        assert!(!JobStatus::Failed.is_pending());
        assert!(!JobStatus::Stopped.is_pending());
        assert!(!JobStatus::Canceled.is_pending());
    }

    #[test]
    fn test_display_matches_stored_form() {
        for status in [JobStatus::Queued, JobStatus::Finished, JobStatus::Canceled] {
            assert_eq!(status.to_string().parse::<JobStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_indexing_timeout_is_one_hour() {
        assert_eq!(INDEXING_TIMEOUT.as_secs(), 3600);
    }
}
