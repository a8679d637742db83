//! Wire format of the inbound event envelope, and its mapping to domain entities

use serde::{Deserialize, Deserializer};

use crate::entities::{AuthorizationRecord, ReactionEvent, TargetItem};
use crate::error::DecodeError;

/// Treat an explicit `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Event callback envelope
///
/// The verification `token` and the envelope `type` are accepted but not retained.
#[derive(Debug, Default, Deserialize)]
pub(super) struct Envelope {
    #[serde(default, deserialize_with = "null_as_default")]
    team_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    api_app_id: String,
    #[serde(default)]
    event: Option<Event>,
    /// `null` elements decode as empty records
    #[serde(default, deserialize_with = "null_as_default")]
    authorizations: Vec<Option<Authorization>>,
}

#[derive(Debug, Default, Deserialize)]
struct Event {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    reaction: String,
    #[serde(default, deserialize_with = "null_as_default")]
    item: Item,
    #[serde(default, deserialize_with = "null_as_default")]
    item_user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    event_ts: String,
}

#[derive(Debug, Default, Deserialize)]
struct Item {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    channel: String,
    #[serde(default, deserialize_with = "null_as_default")]
    ts: String,
}

#[derive(Debug, Default, Deserialize)]
struct Authorization {
    #[serde(default, deserialize_with = "null_as_default")]
    user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    is_bot: bool,
}

impl TryFrom<Envelope> for ReactionEvent {
    type Error = DecodeError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        let event = envelope.event.ok_or(DecodeError::MissingEventKind)?;
        let kind = event.kind.ok_or(DecodeError::MissingEventKind)?;

        Ok(Self {
            kind,
            user: event.user,
            reaction: event.reaction,
            item: TargetItem {
                kind: event.item.kind,
                channel: event.item.channel,
                ts: event.item.ts,
            },
            item_user: event.item_user,
            event_ts: event.event_ts,
            team_id: envelope.team_id,
            api_app_id: envelope.api_app_id,
            authorizations: envelope
                .authorizations
                .into_iter()
                .map(Option::unwrap_or_default)
                .map(|auth| AuthorizationRecord {
                    user_id: auth.user_id,
                    is_bot: auth.is_bot,
                })
                .collect(),
        })
    }
}
