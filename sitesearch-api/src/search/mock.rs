use crate::error::{SearchError, SearchResult};
use crate::search::traits::{IndexInfo, SearchClient};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock implementation of SearchClient for unit testing
#[derive(Clone)]
pub struct MockSearchClient {
    index_name: String,
    response: Arc<Mutex<SearchResult<IndexInfo>>>,
    info_calls: Arc<Mutex<usize>>,
}

impl MockSearchClient {
    /// Create a mock whose index exists and holds `num_docs` documents
    pub fn available(index_name: &str, num_docs: u64) -> Self {
        let mock = Self::missing(index_name);
        mock.set_available(num_docs);
        mock
    }

    /// Create a mock whose index does not exist
    pub fn missing(index_name: &str) -> Self {
        Self {
            index_name: index_name.to_string(),
            response: Arc::new(Mutex::new(Err(SearchError::UnknownIndex(
                "Unknown Index name".to_string(),
            )))),
            info_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a mock whose engine fails with something other than absence
    pub fn failing(index_name: &str, error: SearchError) -> Self {
        let mock = Self::missing(index_name);
        *mock.response.lock().unwrap() = Err(error);
        mock
    }

    pub fn set_available(&self, num_docs: u64) {
        *self.response.lock().unwrap() = Ok(IndexInfo {
            index_name: self.index_name.clone(),
            num_docs: Some(num_docs),
            indexing: Some(false),
        });
    }

    pub fn info_calls(&self) -> usize {
        *self.info_calls.lock().unwrap()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    fn index_name(&self) -> &str {
        &self.index_name
    }

    async fn info(&self) -> SearchResult<IndexInfo> {
        *self.info_calls.lock().unwrap() += 1;
        self.response.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_available() {
        let mock = MockSearchClient::available("docs", 10);

        let info = mock.info().await.unwrap();
        assert_eq!(info.index_name, "docs");
        assert_eq!(info.num_docs, Some(10));
        assert_eq!(mock.info_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_missing_then_available() {
        let mock = MockSearchClient::missing("docs");
        assert!(matches!(mock.info().await, Err(SearchError::UnknownIndex(_))));

        mock.set_available(3);
        assert!(mock.info().await.is_ok());
        assert_eq!(mock.info_calls(), 2);
    }
}
