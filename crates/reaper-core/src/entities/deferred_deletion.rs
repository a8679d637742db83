//! Deferred deletion request - the message handed to the time bomb consumer

use serde::{Deserialize, Serialize};

use crate::entities::MessageRef;

/// Request to delete a message after `ttl` seconds.
///
/// Serialized as `{"channel":"C1","ts":"100.1","ttl":5}` onto the deferred-deletion
/// channel. No acknowledgment is awaited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredDeletionRequest {
    pub channel: String,
    pub ts: String,
    /// Seconds until deletion
    pub ttl: u64,
}

impl DeferredDeletionRequest {
    /// Create a new request for a message
    pub fn new(target: &MessageRef, ttl: u64) -> Self {
        Self {
            channel: target.channel.clone(),
            ts: target.ts.clone(),
            ttl,
        }
    }

    /// Reference to the message scheduled for deletion
    pub fn target(&self) -> MessageRef {
        MessageRef::new(self.channel.clone(), self.ts.clone())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
