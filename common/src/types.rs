use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// One site whose pages are indexed for search.
///
/// Only `url` and `index_name` are read here; everything else is carried
/// through untouched to the index task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfiguration {
    pub url: String,
    pub index_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// On-disk site list (loaded at startup)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<SiteConfiguration>,
}

/// Payload of the index rebuild job, executed by an external worker as
/// `index(sites, create_index) -> bool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexTask {
    pub func_name: String,
    pub sites: Vec<SiteConfiguration>,
    pub create_index: bool,
}

impl IndexTask {
    pub const FUNC_NAME: &'static str = "sitesearch.tasks.index";

    /// Full rebuild of every site, creating the index first.
    pub fn rebuild(sites: Vec<SiteConfiguration>) -> Self {
        Self {
            func_name: Self::FUNC_NAME.to_string(),
            sites,
            create_index: true,
        }
    }

    /// The call as the worker's JSON serializer stores it:
    /// `[func_name, instance, args, kwargs]`
    pub fn call_payload(&self) -> Value {
        json!([
            self.func_name,
            null,
            [self.sites],
            { "create_index": self.create_index },
        ])
    }

    /// Human-readable call signature, stored alongside the job.
    pub fn description(&self) -> String {
        format!(
            "{}(<{} sites>, create_index={})",
            self.func_name,
            self.sites.len(),
            self.create_index
        )
    }
}
