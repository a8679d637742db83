//! Event classifier

use crate::entities::ReactionEvent;
use crate::routing::{IgnoreReason, RoutingDecision};

/// Event kind handled by the reaper
pub const REACTION_ADDED: &str = "reaction_added";
/// Item kind that can be deleted
pub const ITEM_KIND_MESSAGE: &str = "message";
/// Reaction that deletes the message immediately
pub const REACTION_DELETE_NOW: &str = "wastebasket";
/// Reaction that schedules the message for deferred deletion
pub const REACTION_DEFERRED_DELETE: &str = "bomb";

/// Classifies decoded events into routing decisions.
///
/// Holds the process-wide default TTL; the TTL is never taken from event content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    default_ttl: u64,
}

impl Classifier {
    /// Create a classifier that schedules deferred deletions with `default_ttl` seconds
    pub fn new(default_ttl: u64) -> Self {
        Self { default_ttl }
    }

    /// TTL attached to every scheduled deletion
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Classify an event. First matching rule wins.
    pub fn classify(&self, event: &ReactionEvent) -> RoutingDecision {
        if event.kind != REACTION_ADDED {
            return RoutingDecision::Ignore(IgnoreReason::NonReactionEvent);
        }

        if !event.item.is_message() {
            return RoutingDecision::Ignore(IgnoreReason::NonMessageItem);
        }

        if event.is_from_bot() {
            return RoutingDecision::Ignore(IgnoreReason::AutomatedOriginator);
        }

        if event.is_reaction(REACTION_DELETE_NOW) {
            return RoutingDecision::DeleteNow(event.item.message_ref());
        }

        if event.is_reaction(REACTION_DEFERRED_DELETE) {
            return RoutingDecision::ScheduleDelete {
                target: event.item.message_ref(),
                ttl: self.default_ttl,
            };
        }

        RoutingDecision::Ignore(IgnoreReason::UnsupportedReaction)
    }
}
