//! Capability traits
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! (Slack client, Redis publisher) provides the implementation.

use async_trait::async_trait;

use crate::entities::MessageRef;
use crate::error::PortError;

/// Result type for capability calls
pub type PortResult<T> = Result<T, PortError>;

// ============================================================================
// Message Deleter
// ============================================================================

#[async_trait]
pub trait MessageDeleter: Send + Sync {
    /// Delete a message immediately
    async fn delete_message(&self, target: &MessageRef) -> PortResult<()>;
}

// ============================================================================
// Payload Publisher
// ============================================================================

#[async_trait]
pub trait PayloadPublisher: Send + Sync {
    /// Publish a serialized payload to a named channel
    async fn publish(&self, channel: &str, payload: &str) -> PortResult<()>;
}
