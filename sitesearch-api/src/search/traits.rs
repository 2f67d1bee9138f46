use crate::error::SearchResult;
use async_trait::async_trait;
use serde::Serialize;

/// Metadata reported by the search engine for a live index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexInfo {
    pub index_name: String,
    pub num_docs: Option<u64>,
    /// True while the engine is still scanning documents into the index
    pub indexing: Option<bool>,
}

/// Abstraction for search engine calls to enable testing with mocks
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Name of the index this client queries
    fn index_name(&self) -> &str;

    /// Fetch index metadata.
    ///
    /// Implementations must return `SearchError::UnknownIndex` only when the
    /// engine reports that the index does not exist.
    async fn info(&self) -> SearchResult<IndexInfo>;
}
