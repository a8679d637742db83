//! Slack Web API client

use async_trait::async_trait;
use reaper_core::{MessageDeleter, MessageRef, PortResult};
use serde::{Deserialize, Serialize};

use crate::error::{SlackError, SlackResult};

/// Production Web API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";

const CHAT_DELETE: &str = "chat.delete";

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    channel: &'a str,
    ts: &'a str,
}

/// Envelope shared by every Web API response
#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Slack Web API client authenticated with a bot token
#[derive(Clone)]
pub struct SlackClient {
    client: reqwest::Client,
    bot_token: String,
    api_base_url: String,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a client against the production API
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self::with_base_url(bot_token, DEFAULT_API_BASE_URL)
    }

    /// Create a client against a custom API base URL
    pub fn with_base_url(bot_token: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            client: reqwest::Client::new(),
            bot_token: bot_token.into(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from reaper-common config
    pub fn from_config(config: &reaper_common::SlackConfig) -> Self {
        Self::with_base_url(&config.bot_token, &config.api_base_url)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_base_url)
    }

    /// Delete a message via `chat.delete`
    pub async fn delete_message(&self, channel: &str, ts: &str) -> SlackResult<()> {
        tracing::debug!(channel = %channel, ts = %ts, "Calling chat.delete");

        let resp = self
            .client
            .post(self.method_url(CHAT_DELETE))
            .bearer_auth(&self.bot_token)
            .json(&DeleteRequest { channel, ts })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(SlackError::Status {
                method: CHAT_DELETE,
                status: status.as_u16(),
                body,
            });
        }

        // Slack returns 200 for most app-level errors; check JSON "ok" field
        let parsed: ApiResponse = serde_json::from_str(&body).unwrap_or_default();
        if !parsed.ok {
            return Err(SlackError::Api {
                method: CHAT_DELETE,
                error: parsed.error.unwrap_or_else(|| "unknown".to_string()),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl MessageDeleter for SlackClient {
    async fn delete_message(&self, target: &MessageRef) -> PortResult<()> {
        SlackClient::delete_message(self, &target.channel, &target.ts)
            .await
            .map_err(Into::into)
    }
}
