//! Payload decoder
//!
//! Turns a raw pub/sub payload into a [`ReactionEvent`]. Pure parse, no side effects.

mod wire;

use crate::entities::ReactionEvent;
use crate::error::DecodeError;

/// Decode a raw JSON payload into a reaction event.
///
/// Fails when the payload is not a JSON object of the envelope shape, or when
/// `event.type` is missing. Every other absent or `null` field decodes to its
/// empty default and is left for the classifier to reject.
pub fn decode(raw: &str) -> Result<ReactionEvent, DecodeError> {
    let envelope: wire::Envelope = serde_json::from_str(raw)?;
    ReactionEvent::try_from(envelope)
}
