//! Redis Pub/Sub publisher.
//!
//! Publishes serialized payloads to Redis channels. Used for handing deferred
//! deletion requests to the time bomb consumer.

use crate::pool::{RedisPool, RedisResult};
use async_trait::async_trait;
use reaper_core::{PayloadPublisher, PortError, PortResult};
use redis::AsyncCommands;

/// Redis Pub/Sub publisher
#[derive(Debug, Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish a raw message to a channel, returning the number of receivers
    pub async fn publish(&self, channel: &str, message: &str) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;

        let receivers: u32 = conn.publish(channel, message).await?;

        tracing::debug!(
            channel = %channel,
            receivers = receivers,
            "Published raw message"
        );

        Ok(receivers)
    }
}

#[async_trait]
impl PayloadPublisher for Publisher {
    async fn publish(&self, channel: &str, payload: &str) -> PortResult<()> {
        Publisher::publish(self, channel, payload)
            .await
            .map(|_| ())
            .map_err(|e| PortError::transport(e.to_string()))
    }
}
