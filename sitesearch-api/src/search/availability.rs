use crate::error::SearchError;
use crate::search::traits::{IndexInfo, SearchClient};
use std::sync::Arc;

/// Outcome of a single liveness query against the search index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available(IndexInfo),
    /// The engine says the index does not exist; a rebuild will fix it
    Unavailable(String),
    /// The engine could not be asked; a rebuild would not help
    Error(SearchError),
}

pub struct IndexAvailabilityChecker<S: SearchClient + ?Sized> {
    search: Arc<S>,
}

impl<S: SearchClient + ?Sized> Clone for IndexAvailabilityChecker<S> {
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
        }
    }
}

impl<S: SearchClient + ?Sized> IndexAvailabilityChecker<S> {
    pub fn new(search: Arc<S>) -> Self {
        Self { search }
    }

    pub fn index_name(&self) -> &str {
        self.search.index_name()
    }

    pub async fn check(&self) -> Availability {
        match self.search.info().await {
            Ok(info) => Availability::Available(info),
            Err(SearchError::UnknownIndex(reason)) => Availability::Unavailable(reason),
            Err(e) => Availability::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::mock::MockSearchClient;

    #[tokio::test]
    async fn test_check_available() {
        let search = Arc::new(MockSearchClient::available("docs", 5));
        let checker = IndexAvailabilityChecker::new(search);

        match checker.check().await {
            Availability::Available(info) => assert_eq!(info.num_docs, Some(5)),
            other => panic!("Expected Available, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_check_unavailable() {
        let search = Arc::new(MockSearchClient::missing("docs"));
        let checker = IndexAvailabilityChecker::new(search);

        assert!(matches!(checker.check().await, Availability::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_check_error_not_conflated_with_absence() {
        let mock = MockSearchClient::failing(
            "docs",
            SearchError::Upstream("Connection refused (os error 111)".to_string()),
        );
        let checker = IndexAvailabilityChecker::new(Arc::new(mock));

        assert_eq!(
            checker.check().await,
            Availability::Error(SearchError::Upstream(
                "Connection refused (os error 111)".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_check_malformed_is_error() {
        let mock = MockSearchClient::failing("docs", SearchError::Malformed("empty".to_string()));
        let checker = IndexAvailabilityChecker::new(Arc::new(mock));

        assert!(matches!(checker.check().await, Availability::Error(_)));
    }
}
