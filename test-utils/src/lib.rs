use anyhow::{Context, Result};
/// Test utilities for integration tests
/// Manages a disposable Redis Stack container and job/index fixtures
use std::process::Command;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const CONTAINER_NAME: &str = "sitesearch-redis-stack";
pub const REDIS_IMAGE: &str = "redis/redis-stack-server:latest";
pub const REDIS_PORT: u16 = 6399;
pub const QUEUE_NAME: &str = "default";

/// Test fixture that manages the Redis Stack container lifecycle
pub struct RedisStack {
    container_name: String,
}

impl RedisStack {
    /// Get or start the test container, then wipe its data
    /// Idempotent - safe to call multiple times
    pub fn setup() -> Result<Self> {
        let stack = Self {
            container_name: CONTAINER_NAME.to_string(),
        };

        if !stack.is_running()? {
            println!("Starting Redis Stack container: {}", CONTAINER_NAME);
            stack.start()?;
        } else {
            println!("Using running Redis Stack container: {}", CONTAINER_NAME);
        }

        stack.wait_for_ready()?;
        stack.flush()?;

        Ok(stack)
    }

    pub fn url(&self) -> String {
        format!("redis://127.0.0.1:{}", REDIS_PORT)
    }

    /// Check if the container is running
    fn is_running(&self) -> Result<bool> {
        let output = Command::new("docker")
            .args([
                "ps",
                "--filter",
                &format!("name=^{}$", self.container_name),
                "--format",
                "{{.Names}}",
            ])
            .output()
            .context("Failed to execute 'docker ps'")?;

        if !output.status.success() {
            return Ok(false);
        }

        let names = String::from_utf8_lossy(&output.stdout);
        Ok(names.lines().any(|line| line.trim() == self.container_name))
    }

    fn start(&self) -> Result<()> {
        let status = Command::new("docker")
            .args([
                "run",
                "--detach",
                "--rm",
                "--name",
                &self.container_name,
                "--publish",
                &format!("{}:6379", REDIS_PORT),
                REDIS_IMAGE,
            ])
            .stdout(std::process::Stdio::inherit())
            .stderr(std::process::Stdio::inherit())
            .status()
            .context("Failed to spawn 'docker run'")?;

        if !status.success() {
            anyhow::bail!("docker run {} failed", REDIS_IMAGE);
        }

        Ok(())
    }

    /// Wait until redis-cli inside the container answers PONG
    fn wait_for_ready(&self) -> Result<()> {
        println!("Waiting for Redis to accept connections...");

        for _ in 0..30 {
            let output = self.redis_cli(&["PING"])?;
            if output.trim() == "PONG" {
                return Ok(());
            }
            std::thread::sleep(Duration::from_secs(1));
        }

        anyhow::bail!("Redis did not become ready in time")
    }

    /// Remove all keys and search indexes (clean slate)
    pub fn flush(&self) -> Result<()> {
        self.redis_cli(&["FLUSHALL"])?;
        Ok(())
    }

    /// Connections the server has accepted since it started
    pub fn total_connections_received(&self) -> Result<u64> {
        let stats = self.redis_cli(&["INFO", "stats"])?;

        stats
            .lines()
            .find_map(|line| line.trim().strip_prefix("total_connections_received:"))
            .context("INFO stats has no total_connections_received")?
            .parse()
            .context("Invalid total_connections_received")
    }

    fn redis_cli(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("docker")
            .args(["exec", &self.container_name, "redis-cli"])
            .args(args)
            .output()
            .context("Failed to execute redis-cli in container")?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

async fn connection(url: &str) -> Result<redis::aio::MultiplexedConnection> {
    let client = redis::Client::open(url).context("Invalid Redis URL")?;
    client
        .get_multiplexed_async_connection()
        .await
        .context("Failed to connect to Redis")
}

/// Create an empty RediSearch index over `doc:` hashes
pub async fn create_search_index(url: &str, index_name: &str) -> Result<()> {
    let mut conn = connection(url).await?;

    let _: () = redis::cmd("FT.CREATE")
        .arg(index_name)
        .arg(&["ON", "HASH", "PREFIX", "1", "doc:", "SCHEMA", "title", "TEXT"][..])
        .query_async(&mut conn)
        .await
        .context(format!("Failed to create index {}", index_name))?;

    println!("✓ Created search index {}", index_name);
    Ok(())
}

/// Write a job record with only a status field, as a worker would leave it
pub async fn set_job_status(url: &str, job_id: &str, status: &str) -> Result<()> {
    let mut conn = connection(url).await?;

    let _: () = redis::cmd("HSET")
        .arg(format!("rq:job:{}", job_id))
        .arg("status")
        .arg(status)
        .query_async(&mut conn)
        .await?;

    Ok(())
}

/// Add a job id to the started registry, expiring `ttl` from now
pub async fn add_to_started_registry(url: &str, job_id: &str, ttl: Duration) -> Result<()> {
    let mut conn = connection(url).await?;

    let expires_at = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() + ttl.as_secs();
    let _: () = redis::cmd("ZADD")
        .arg(format!("rq:wip:{}", QUEUE_NAME))
        .arg(expires_at)
        .arg(job_id)
        .query_async(&mut conn)
        .await?;

    Ok(())
}

/// Number of job ids waiting in the queue
pub async fn queue_length(url: &str) -> Result<usize> {
    let mut conn = connection(url).await?;

    let len: usize = redis::cmd("LLEN")
        .arg(format!("rq:queue:{}", QUEUE_NAME))
        .query_async(&mut conn)
        .await?;

    Ok(len)
}
