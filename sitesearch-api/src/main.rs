use sitesearch_api::{jobs, search, server, sites, Config, HealthCheck};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.clone())
        .init();

    tracing::info!("Sitesearch API starting");
    tracing::info!("Port: {}", config.port);
    tracing::info!("Queue: {}", config.queue_name);
    tracing::info!("Sites file: {}", config.sites_path);

    let sites = sites::load_sites(&config.sites_path).await?;
    let index_name = sites::default_search_site(&sites)
        .map(|site| site.index_name.clone())
        .ok_or_else(|| anyhow::anyhow!("No default search site"))?;
    tracing::info!("Loaded {} sites, probing index {}", sites.len(), index_name);

    let job_queue = jobs::RedisJobQueue::new(&config.redis_url, config.queue_name.clone())?;
    let search_client = search::RediSearchClient::new(&config.search_redis_url, index_name)?;

    // Health check with dynamic dispatch
    let health = Arc::new(HealthCheck::new(
        Arc::new(job_queue) as Arc<dyn jobs::JobQueue>,
        Arc::new(search_client) as Arc<dyn search::SearchClient>,
        sites,
    ));

    let state = sitesearch_api::AppState::new(health);

    // Build HTTP server
    let app = server::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Sitesearch API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
