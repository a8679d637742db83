//! Domain entities
//!
//! Core business entities for the reaction reaper.

mod deferred_deletion;
mod reaction_event;

pub use deferred_deletion::DeferredDeletionRequest;
pub use reaction_event::{AuthorizationRecord, MessageRef, ReactionEvent, TargetItem};
