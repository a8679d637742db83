//! Redis connection pool using deadpool-redis.
//!
//! Backs the deferred deletion publisher. Startup uses [`RedisPool::connect`],
//! which refuses to hand out a pool for a server that does not answer PING.

use std::time::Duration;

use deadpool_redis::{Config, Pool, Runtime};

/// Redis pool configuration
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Redis connection URL (e.g., `redis://localhost:6379/0`)
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: usize,
    /// Limit for opening a connection or waiting for a free one
    pub timeout: Duration,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 10,
            timeout: Duration::from_secs(5),
        }
    }
}

impl From<&reaper_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &reaper_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
            ..Self::default()
        }
    }
}

/// Error type for Redis pool operations
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Invalid Redis pool configuration: {0}")]
    Build(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),
}

/// Result type for Redis pool operations
pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Managed Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("size", &status.size)
            .field("available", &status.available)
            .field("max_size", &status.max_size)
            .finish()
    }
}

impl RedisPool {
    /// Build a pool without opening any connection
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let pool = Config::from_url(config.url.as_str())
            .builder()
            .map_err(|e| RedisPoolError::Build(e.to_string()))?
            .max_size(config.max_connections)
            .create_timeout(Some(config.timeout))
            .wait_timeout(Some(config.timeout))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::Build(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Build a pool and verify the server answers
    pub async fn connect(config: RedisPoolConfig) -> RedisResult<Self> {
        let endpoint = reaper_common::redact_url(&config.url).to_string();
        let max_connections = config.max_connections;

        let pool = Self::new(config)?;
        pool.health_check().await?;

        tracing::info!(
            endpoint = %endpoint,
            max_connections = max_connections,
            "Redis pool connected"
        );
        Ok(pool)
    }

    /// Build and verify a pool from reaper-common config
    pub async fn connect_with(config: &reaper_common::RedisConfig) -> RedisResult<Self> {
        Self::connect(RedisPoolConfig::from(config)).await
    }

    /// Check a connection out of the pool
    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    #[must_use]
    pub fn status(&self) -> deadpool_redis::Status {
        self.pool.status()
    }

    /// Send PING on a pooled connection
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
