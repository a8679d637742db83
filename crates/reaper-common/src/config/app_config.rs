//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).
//! The resulting [`AppConfig`] is read-only for the life of the process.

use std::env;
use std::fmt;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub slack: SlackConfig,
    pub redis: RedisConfig,
    pub channels: ChannelConfig,
    pub relay: RelayConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse an environment name, case-insensitively
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Slack Web API configuration
#[derive(Clone)]
pub struct SlackConfig {
    pub bot_token: String,
    pub api_base_url: String,
}

impl fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackConfig")
            .field("bot_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Redis configuration
#[derive(Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

impl RedisConfig {
    /// Build a connection URL from address, password and database index.
    ///
    /// The password is percent-encoded so reserved characters (`@`, `/`, `#`,
    /// `:`) survive URL parsing.
    #[must_use]
    pub fn build_url(addr: &str, password: &str, db: u32) -> String {
        if password.is_empty() {
            format!("redis://{addr}/{db}")
        } else {
            format!(
                "redis://:{}@{addr}/{db}",
                urlencoding::encode(password)
            )
        }
    }

    /// Connection URL with credentials stripped, for logging
    #[must_use]
    pub fn redacted_url(&self) -> &str {
        redact_url(&self.url)
    }
}

/// Strip the scheme and any userinfo from a connection URL.
///
/// Splits on the last `@`, so a hand-written `REDIS_URL` whose password was
/// not encoded is still fully hidden.
#[must_use]
pub fn redact_url(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.rsplit_once('@').map_or(rest, |(_, host)| host)
}

impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("url", &self.redacted_url())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Pub/Sub channel names
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Inbound channel carrying reaction events
    pub reactions: String,
    /// Outbound channel for deferred deletion requests
    pub timebomb: String,
}

/// Dispatch behaviour
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// TTL in seconds attached to every deferred deletion
    pub default_ttl_seconds: u64,
    /// Upper bound on a single delete or publish call; `None` means unbounded
    pub dispatch_timeout: Option<Duration>,
    /// Delay before re-establishing a lost subscription
    pub reconnect_delay_ms: u64,
}

// Default value functions
fn default_app_name() -> String {
    "reaction-reaper".to_string()
}

fn default_slack_api_base_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_redis_addr() -> String {
    "localhost:6379".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_reactions_channel() -> String {
    "slack-relay-reaction-added".to_string()
}

fn default_timebomb_channel() -> String {
    "timebomb-messages".to_string()
}

fn default_ttl_seconds() -> u64 {
    5
}

fn default_reconnect_delay_ms() -> u64 {
    1000
}

/// Parse a numeric variable, falling back to `default` with a warning when malformed
fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + fmt::Display + Copy,
{
    match non_empty(lookup, key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(
                key = key,
                value = %raw,
                default = %default,
                "Invalid numeric value, using default"
            );
            default
        }),
    }
}

/// Look up a variable, treating an empty value as unset
fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.is_empty())
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token =
            non_empty(&lookup, "SLACK_BOT_TOKEN").ok_or(ConfigError::MissingVar("SLACK_BOT_TOKEN"))?;

        let redis_url = non_empty(&lookup, "REDIS_URL").unwrap_or_else(|| {
            RedisConfig::build_url(
                &non_empty(&lookup, "REDIS_ADDR").unwrap_or_else(default_redis_addr),
                &non_empty(&lookup, "REDIS_PASSWORD").unwrap_or_default(),
                parse_or_default(&lookup, "REDIS_DB", 0),
            )
        });

        let api_base_url =
            non_empty(&lookup, "SLACK_API_BASE_URL").unwrap_or_else(default_slack_api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue("SLACK_API_BASE_URL", api_base_url));
        }

        let dispatch_timeout = match parse_or_default(&lookup, "DISPATCH_TIMEOUT_SECONDS", 0u64) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            app: AppSettings {
                name: non_empty(&lookup, "APP_NAME").unwrap_or_else(default_app_name),
                env: non_empty(&lookup, "APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            slack: SlackConfig {
                bot_token,
                api_base_url: api_base_url.trim_end_matches('/').to_string(),
            },
            redis: RedisConfig {
                url: redis_url,
                max_connections: parse_or_default(
                    &lookup,
                    "REDIS_MAX_CONNECTIONS",
                    default_redis_max_connections(),
                ),
            },
            channels: ChannelConfig {
                reactions: non_empty(&lookup, "REDIS_CHANNEL")
                    .unwrap_or_else(default_reactions_channel),
                timebomb: non_empty(&lookup, "TIMEBOMB_REDIS_CHANNEL")
                    .unwrap_or_else(default_timebomb_channel),
            },
            relay: RelayConfig {
                default_ttl_seconds: parse_or_default(
                    &lookup,
                    "TIMEBOMB_TTL_SECONDS",
                    default_ttl_seconds(),
                ),
                dispatch_timeout,
                reconnect_delay_ms: parse_or_default(
                    &lookup,
                    "SUBSCRIBER_RECONNECT_DELAY_MS",
                    default_reconnect_delay_ms(),
                ),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
