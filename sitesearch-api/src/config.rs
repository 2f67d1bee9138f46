use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub search_redis_url: String,
    pub queue_name: String,
    pub sites_path: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            search_redis_url: env::var("SEARCH_REDIS_URL").unwrap_or_else(|_| redis_url.clone()),
            redis_url,
            queue_name: env::var("QUEUE_NAME").unwrap_or_else(|_| common::DEFAULT_QUEUE.to_string()),
            sites_path: env::var("SITES_PATH")
                .unwrap_or_else(|_| "/etc/sitesearch/sites.json".to_string()),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
