//! Routing decision - the output of classification

use std::fmt;

use crate::entities::MessageRef;

/// Why an event was not acted upon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    NonReactionEvent,
    NonMessageItem,
    AutomatedOriginator,
    UnsupportedReaction,
}

impl IgnoreReason {
    /// Reason code used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonReactionEvent => "non-reaction event",
            Self::NonMessageItem => "non-message item",
            Self::AutomatedOriginator => "automated originator",
            Self::UnsupportedReaction => "unsupported reaction",
        }
    }
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a classified event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    Ignore(IgnoreReason),
    DeleteNow(MessageRef),
    ScheduleDelete { target: MessageRef, ttl: u64 },
}

impl RoutingDecision {
    /// Check if the decision leads to a side effect
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Self::Ignore(_))
    }
}
