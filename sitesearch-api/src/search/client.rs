use crate::error::{SearchError, SearchResult};
use crate::search::traits::{IndexInfo, SearchClient};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{ErrorKind, RedisError, Value};
use tokio::sync::OnceCell;

/// Reply fragments RediSearch uses for a missing index, across versions
const UNKNOWN_INDEX_MARKERS: [&str; 2] = ["unknown index", "no such index"];

/// RediSearch client issuing `FT.INFO` against a single index
pub struct RediSearchClient {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
    index_name: String,
}

impl RediSearchClient {
    pub fn new(redis_url: &str, index_name: impl Into<String>) -> SearchResult<Self> {
        let client = redis::Client::open(redis_url).map_err(classify_error)?;
        Ok(Self::from_client(client, index_name))
    }

    pub fn from_client(client: redis::Client, index_name: impl Into<String>) -> Self {
        Self {
            client,
            conn: OnceCell::new(),
            index_name: index_name.into(),
        }
    }

    async fn connection(&self) -> SearchResult<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await
            .map_err(classify_error)?;

        Ok(conn.clone())
    }
}

#[async_trait]
impl SearchClient for RediSearchClient {
    fn index_name(&self) -> &str {
        &self.index_name
    }

    async fn info(&self) -> SearchResult<IndexInfo> {
        let mut conn = self.connection().await?;

        let reply: Vec<Value> = redis::cmd("FT.INFO")
            .arg(&self.index_name)
            .query_async(&mut conn)
            .await
            .map_err(classify_error)?;

        parse_info(&self.index_name, &reply)
    }
}

/// Map a Redis error onto the search error taxonomy.
///
/// Only a server reply naming a missing index counts as `UnknownIndex`.
/// Connection, auth and protocol failures are never read as absence.
fn classify_error(err: RedisError) -> SearchError {
    let message = err.to_string();

    match err.kind() {
        ErrorKind::ResponseError | ErrorKind::ExtensionError if is_unknown_index(&message) => {
            SearchError::UnknownIndex(message)
        }
        ErrorKind::TypeError => SearchError::Malformed(message),
        _ => SearchError::Upstream(message),
    }
}

fn is_unknown_index(message: &str) -> bool {
    // redis-rs renders unrecognised error codes as "Code: detail"
    let normalized = message
        .to_ascii_lowercase()
        .replace(':', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    UNKNOWN_INDEX_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
}

/// Parse the flat key/value array returned by `FT.INFO`
fn parse_info(index_name: &str, reply: &[Value]) -> SearchResult<IndexInfo> {
    if reply.is_empty() || reply.len() % 2 != 0 {
        return Err(SearchError::Malformed(format!(
            "FT.INFO returned {} elements",
            reply.len()
        )));
    }

    let mut info = IndexInfo {
        index_name: index_name.to_string(),
        num_docs: None,
        indexing: None,
    };

    for pair in reply.chunks(2) {
        let key: String = match redis::from_redis_value(&pair[0]) {
            Ok(key) => key,
            Err(_) => continue,
        };

        match key.as_str() {
            "index_name" => {
                if let Ok(name) = redis::from_redis_value::<String>(&pair[1]) {
                    info.index_name = name;
                }
            }
            "num_docs" => info.num_docs = redis::from_redis_value::<u64>(&pair[1]).ok(),
            "indexing" => {
                info.indexing = redis::from_redis_value::<i64>(&pair[1])
                    .ok()
                    .map(|flag| flag != 0)
            }
            _ => {}
        }
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(s: &str) -> Value {
        Value::Data(s.as_bytes().to_vec())
    }

    #[test]
    fn test_unknown_index_reply_classified_as_absence() {
        let err = RedisError::from((
            ErrorKind::ResponseError,
            "An error was signalled by the server",
            "Unknown Index name".to_string(),
        ));
        assert!(matches!(classify_error(err), SearchError::UnknownIndex(_)));
    }

    #[test]
    fn test_no_such_index_reply_classified_as_absence() {
        let err = RedisError::from((
            ErrorKind::ResponseError,
            "An error was signalled by the server",
            "sitesearch: no such index".to_string(),
        ));
        assert!(matches!(classify_error(err), SearchError::UnknownIndex(_)));
    }

    #[test]
    fn test_unknown_command_is_upstream_error() {
        let err = RedisError::from((
            ErrorKind::ResponseError,
            "An error was signalled by the server",
            "unknown command 'FT.INFO'".to_string(),
        ));
        assert!(matches!(classify_error(err), SearchError::Upstream(_)));
    }

    #[test]
    fn test_io_error_is_never_absence() {
        // even when the text happens to mention an unknown index
        let err = RedisError::from((ErrorKind::IoError, "Unknown Index name"));
        assert!(matches!(classify_error(err), SearchError::Upstream(_)));
    }

    #[test]
    fn test_auth_error_is_upstream_error() {
        let err = RedisError::from((ErrorKind::AuthenticationFailed, "invalid password"));
        assert!(matches!(classify_error(err), SearchError::Upstream(_)));
    }

    #[test]
    fn test_type_error_is_malformed() {
        let err = RedisError::from((ErrorKind::TypeError, "Response was of incompatible type"));
        assert!(matches!(classify_error(err), SearchError::Malformed(_)));
    }

    #[test]
    fn test_is_unknown_index_normalizes_code_prefix() {
        assert!(is_unknown_index("Unknown: Index name"));
        assert!(is_unknown_index("UNKNOWN INDEX NAME"));
        assert!(!is_unknown_index("Connection refused"));
    }

    #[test]
    fn test_parse_info() {
        let reply = vec![
            data("index_name"),
            data("sitesearch"),
            data("index_options"),
            Value::Bulk(vec![]),
            data("num_docs"),
            data("1523"),
            data("indexing"),
            Value::Int(0),
        ];

        let info = parse_info("configured", &reply).unwrap();

        assert_eq!(info.index_name, "sitesearch");
        assert_eq!(info.num_docs, Some(1523));
        assert_eq!(info.indexing, Some(false));
    }

    #[test]
    fn test_parse_info_missing_fields() {
        let reply = vec![data("attributes"), Value::Bulk(vec![])];

        let info = parse_info("configured", &reply).unwrap();

        assert_eq!(info.index_name, "configured");
        assert_eq!(info.num_docs, None);
        assert_eq!(info.indexing, None);
    }

    #[test]
    fn test_parse_info_empty_reply() {
        let result = parse_info("configured", &[]);
        assert!(matches!(result, Err(SearchError::Malformed(_))));
    }
}
