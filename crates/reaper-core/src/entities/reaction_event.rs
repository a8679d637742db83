//! Reaction event entity - a decoded `reaction_added` notification

use std::fmt;

/// Reference to a single message: the channel it lives in and its timestamp id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel: String,
    pub ts: String,
}

impl MessageRef {
    /// Create a new MessageRef
    pub fn new(channel: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            ts: ts.into(),
        }
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.channel, self.ts)
    }
}

/// The item a reaction was attached to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetItem {
    /// Item kind tag (e.g. "message", "file")
    pub kind: String,
    pub channel: String,
    pub ts: String,
}

impl TargetItem {
    /// Check if the item is a message
    #[inline]
    pub fn is_message(&self) -> bool {
        self.kind == crate::routing::ITEM_KIND_MESSAGE
    }

    /// Reference to the targeted message
    pub fn message_ref(&self) -> MessageRef {
        MessageRef::new(self.channel.clone(), self.ts.clone())
    }
}

/// Authorization record attached to an event envelope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationRecord {
    pub user_id: String,
    pub is_bot: bool,
}

impl AuthorizationRecord {
    /// Create a new AuthorizationRecord
    pub fn new(user_id: impl Into<String>, is_bot: bool) -> Self {
        Self {
            user_id: user_id.into(),
            is_bot,
        }
    }
}

/// Decoded reaction event
///
/// Immutable once decoded; lives for a single dispatch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionEvent {
    /// Event kind tag (e.g. "reaction_added")
    pub kind: String,
    /// User who performed the reaction
    pub user: String,
    /// Reaction name (e.g. "wastebasket", "bomb")
    pub reaction: String,
    pub item: TargetItem,
    /// Author of the reacted message
    pub item_user: String,
    pub event_ts: String,
    pub team_id: String,
    pub api_app_id: String,
    pub authorizations: Vec<AuthorizationRecord>,
}

impl ReactionEvent {
    /// Check whether the originator is an automated agent.
    ///
    /// True only when an authorization record matches the originator exactly and is
    /// flagged as a bot. No matching record resolves to "not automated".
    pub fn is_from_bot(&self) -> bool {
        self.authorizations
            .iter()
            .any(|auth| auth.user_id == self.user && auth.is_bot)
    }

    /// Check if the event carries a specific reaction
    #[inline]
    pub fn is_reaction(&self, reaction: &str) -> bool {
        self.reaction == reaction
    }
}
