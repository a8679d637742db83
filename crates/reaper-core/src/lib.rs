//! # reaper-core
//!
//! Domain layer for the reaction reaper: decoded reaction events, the payload decoder,
//! the event classifier, and the capability traits the dispatcher drives.
//! This crate has zero dependencies on infrastructure (Redis, HTTP, etc.).

pub mod decode;
pub mod entities;
pub mod error;
pub mod routing;
pub mod traits;

// Re-export commonly used types at crate root
pub use decode::decode;
pub use entities::{
    AuthorizationRecord, DeferredDeletionRequest, MessageRef, ReactionEvent, TargetItem,
};
pub use error::{DecodeError, DispatchError, PortError};
pub use routing::{
    Classifier, IgnoreReason, RoutingDecision, ITEM_KIND_MESSAGE, REACTION_ADDED,
    REACTION_DEFERRED_DELETE, REACTION_DELETE_NOW,
};
pub use traits::{MessageDeleter, PayloadPublisher, PortResult};
