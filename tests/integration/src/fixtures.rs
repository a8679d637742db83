//! Test fixtures and data generators
//!
//! Provides inbound payloads shaped like the events the Slack relay publishes.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Originator used by default in fixtures
pub const HUMAN_USER: &str = "U0HUMAN";
/// Bot user listed in the default authorizations
pub const BOT_USER: &str = "U0BOT";
/// Container used by default in fixtures
pub const CHANNEL: &str = "C0GENERAL";
/// Item timestamp used by default in fixtures
pub const TS: &str = "1700000000.000100";

/// Reacted-to item
#[derive(Debug, Clone, Serialize)]
pub struct ItemFixture {
    #[serde(rename = "type")]
    pub kind: String,
    pub channel: String,
    pub ts: String,
}

/// Inner event object
#[derive(Debug, Clone, Serialize)]
pub struct EventFixture {
    #[serde(rename = "type")]
    pub kind: String,
    pub user: String,
    pub reaction: String,
    pub item: ItemFixture,
    pub event_ts: String,
}

/// Authorization entry
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationFixture {
    pub user_id: String,
    pub is_bot: bool,
}

/// Full inbound payload
#[derive(Debug, Clone, Serialize)]
pub struct ReactionPayload {
    pub team_id: String,
    pub event: EventFixture,
    pub authorizations: Vec<AuthorizationFixture>,
}

impl ReactionPayload {
    /// A human user adding `reaction` to a message
    pub fn reaction(reaction: &str) -> Self {
        Self {
            team_id: "T0TEAM".to_string(),
            event: EventFixture {
                kind: "reaction_added".to_string(),
                user: HUMAN_USER.to_string(),
                reaction: reaction.to_string(),
                item: ItemFixture {
                    kind: "message".to_string(),
                    channel: CHANNEL.to_string(),
                    ts: TS.to_string(),
                },
                event_ts: "1700000001.000200".to_string(),
            },
            authorizations: vec![AuthorizationFixture {
                user_id: BOT_USER.to_string(),
                is_bot: true,
            }],
        }
    }

    /// Same payload with a unique item timestamp
    pub fn unique(reaction: &str) -> Self {
        Self::reaction(reaction).with_target(CHANNEL, &format!("1700000000.{:06}", unique_suffix()))
    }

    /// Performed by the bot user listed in the authorizations
    pub fn by_bot(mut self) -> Self {
        self.event.user = BOT_USER.to_string();
        self
    }

    pub fn with_event_kind(mut self, kind: &str) -> Self {
        self.event.kind = kind.to_string();
        self
    }

    pub fn with_item_kind(mut self, kind: &str) -> Self {
        self.event.item.kind = kind.to_string();
        self
    }

    pub fn with_target(mut self, channel: &str, ts: &str) -> Self {
        self.event.item.channel = channel.to_string();
        self.event.item.ts = ts.to_string();
        self
    }

    /// Serialize to the wire form
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Payload that is not valid JSON
pub const MALFORMED_PAYLOAD: &str = r#"{"event": {"type": "reaction_added""#;
