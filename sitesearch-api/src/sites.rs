use crate::error::{ApiError, ApiResult};
use common::{SiteConfiguration, SitesFile};

/// Load the configured site list from a JSON file of the form `{"sites": [...]}`.
pub async fn load_sites(path: &str) -> ApiResult<Vec<SiteConfiguration>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ApiError::Config(format!("Failed to read {}: {}", path, e)))?;

    let file: SitesFile = serde_json::from_str(&contents)
        .map_err(|e| ApiError::Config(format!("Invalid site list in {}: {}", path, e)))?;

    if file.sites.is_empty() {
        return Err(ApiError::Config(format!("No sites configured in {}", path)));
    }

    Ok(file.sites)
}

/// The site whose index the readiness check checks.
pub fn default_search_site(sites: &[SiteConfiguration]) -> Option<&SiteConfiguration> {
    sites.first()
}
