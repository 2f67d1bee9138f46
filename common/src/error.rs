use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Unknown job status: {0}")]
    UnknownJobStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_job_status_error() {
        let err = CommonError::UnknownJobStatus("paused".to_string());
        assert_eq!(err.to_string(), "Unknown job status: paused");
    }
}
