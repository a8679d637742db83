//! # reaper-slack
//!
//! Minimal Slack Web API client: the message deletion capability used by the
//! reaction reaper.

mod client;
mod error;

pub use client::{SlackClient, DEFAULT_API_BASE_URL};
pub use error::{SlackError, SlackResult};
