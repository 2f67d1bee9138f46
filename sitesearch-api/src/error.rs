use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;
pub type JobResult<T> = Result<T, JobError>;
pub type SearchResult<T> = Result<T, SearchError>;

/// Failures talking to the job system.
#[derive(Error, Debug)]
pub enum JobError {
    /// The job system holds no record under this identity.
    #[error("No such job: {0}")]
    NoSuchJob(String),

    #[error("Redis error: {0}")]
    Redis(String),

    #[error("Malformed job record: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures talking to the search engine, classified where the call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The engine answered, and the answer is that the index does not exist.
    #[error("Unknown index: {0}")]
    UnknownIndex(String),

    #[error("Search engine error: {0}")]
    Upstream(String),

    #[error("Malformed search engine response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Job queue error: {0}")]
    JobQueue(#[from] JobError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::JobQueue(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ApiError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<redis::RedisError> for JobError {
    fn from(err: redis::RedisError) -> Self {
        JobError::Redis(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_job_queue() {
        let err = ApiError::from(JobError::Redis("connection refused".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_config() {
        let err = ApiError::Config("no sites configured".to_string());
        assert_eq!(err.to_string(), "Configuration error: no sites configured");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_job_error_display() {
        let err = JobError::NoSuchJob("index".to_string());
        assert_eq!(err.to_string(), "No such job: index");

        let err = JobError::Malformed("missing status".to_string());
        assert_eq!(err.to_string(), "Malformed job record: missing status");
    }

    #[test]
    fn test_job_error_from_redis() {
        let redis_err = redis::RedisError::from((redis::ErrorKind::IoError, "broken pipe"));
        let job_err: JobError = redis_err.into();
        assert!(matches!(job_err, JobError::Redis(_)));
        assert!(job_err.to_string().contains("broken pipe"));
    }

    #[test]
    fn test_job_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WriteZero, "short write");
        let job_err: JobError = io_err.into();
        assert!(job_err.to_string().contains("IO error"));
    }

    #[test]
    fn test_search_error_display() {
        let err = SearchError::UnknownIndex("sitesearch".to_string());
        assert_eq!(err.to_string(), "Unknown index: sitesearch");
    }
}
