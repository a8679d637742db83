//! Event classification
//!
//! Decides, for a decoded event, whether to ignore it, delete the target now,
//! or schedule the target for deferred deletion.

mod classifier;
mod decision;

pub use classifier::{
    Classifier, ITEM_KIND_MESSAGE, REACTION_ADDED, REACTION_DEFERRED_DELETE, REACTION_DELETE_NOW,
};
pub use decision::{IgnoreReason, RoutingDecision};
