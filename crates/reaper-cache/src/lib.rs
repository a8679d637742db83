//! # reaper-cache
//!
//! Redis layer for the reaction reaper.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Subscriber**: Inbound reaction events, delivered in receipt order
//! - **Publisher**: Deferred deletion requests for the time bomb consumer
//!
//! ## Example
//!
//! ```ignore
//! use reaper_cache::{Publisher, RedisPool, RedisPoolConfig, SubscriberBuilder};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! pool.health_check().await?;
//!
//! let subscriber = SubscriberBuilder::new()
//!     .redis_url("redis://127.0.0.1:6379")
//!     .subscribe("slack-relay-reaction-added")
//!     .connect()
//!     .await?;
//! let (handle, payloads) = subscriber.into_parts();
//!
//! let publisher = Publisher::new(pool);
//! publisher.publish("timebomb-messages", r#"{"channel":"C1","ts":"1.2","ttl":5}"#).await?;
//! ```

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export pubsub types
pub use pubsub::{
    PayloadStream, Publisher, Subscriber, SubscriberBuilder, SubscriberConfig, SubscriberError,
    SubscriberHandle, SubscriberResult,
};
