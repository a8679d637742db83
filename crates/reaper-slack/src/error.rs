//! Slack client error types

use reaper_core::PortError;

/// Error type for Slack Web API calls
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack {method} failed ({status}): {body}")]
    Status {
        method: &'static str,
        status: u16,
        body: String,
    },

    #[error("Slack {method} failed: {error}")]
    Api { method: &'static str, error: String },
}

/// Result type for Slack client operations
pub type SlackResult<T> = Result<T, SlackError>;

impl From<SlackError> for PortError {
    fn from(err: SlackError) -> Self {
        match err {
            SlackError::Http(e) => PortError::transport(e.to_string()),
            SlackError::Status { status, body, .. } => {
                PortError::rejected(format!("HTTP {status}: {body}"))
            }
            SlackError::Api { error, .. } => PortError::rejected(error),
        }
    }
}
