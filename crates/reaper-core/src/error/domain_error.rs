//! Domain errors - error types for the domain layer

use std::time::Duration;

use thiserror::Error;

use crate::entities::MessageRef;

// =========================================================================
// Decode Errors
// =========================================================================

/// Inbound payload could not be turned into a ReactionEvent
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("payload has no event kind")]
    MissingEventKind,
}

// =========================================================================
// Capability Errors
// =========================================================================

/// Failure reported by an external capability (delete API, publish channel)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// The remote side answered with an error
    #[error("rejected: {0}")]
    Rejected(String),

    /// The request never produced an answer
    #[error("transport failure: {0}")]
    Transport(String),
}

impl PortError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }
}

// =========================================================================
// Dispatch Errors
// =========================================================================

/// An action was attempted and did not complete
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to delete message {target}: {source}")]
    DeleteFailed {
        target: MessageRef,
        #[source]
        source: PortError,
    },

    #[error("failed to serialize deferred deletion request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to publish to {channel}: {source}")]
    PublishFailed {
        channel: String,
        #[source]
        source: PortError,
    },

    #[error("{action} timed out after {after:?}")]
    TimedOut {
        action: &'static str,
        after: Duration,
    },
}

impl DispatchError {
    /// Get error code for log fields
    pub fn code(&self) -> &'static str {
        match self {
            Self::DeleteFailed { .. } => "DELETE_FAILED",
            Self::Serialize(_) => "SERIALIZE_FAILED",
            Self::PublishFailed { .. } => "PUBLISH_FAILED",
            Self::TimedOut { .. } => "TIMED_OUT",
        }
    }
}
