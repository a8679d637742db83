//! Tracing and logging setup
//!
//! Verbosity and output format are fixed when the subscriber is installed;
//! nothing changes them afterwards. `RUST_LOG` takes precedence over the
//! configured level when it is set.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::Environment;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Logging options chosen once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Fallback filter level when `RUST_LOG` is unset
    pub level: Level,
    pub format: LogFormat,
    /// Emit span open/close events
    pub span_events: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            span_events: false,
            source_location: true,
        }
    }
}

impl TracingConfig {
    /// Info-level JSON output without source locations
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Json,
            span_events: false,
            source_location: false,
        }
    }

    /// Build from `APP_ENV`, `LOG_LEVEL` and `LOG_FORMAT`.
    ///
    /// Loads `.env` first, so values set only there apply to logging too.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_values(
            lookup("APP_ENV").as_deref(),
            lookup("LOG_LEVEL").as_deref(),
            lookup("LOG_FORMAT").as_deref(),
        )
    }

    /// Build from raw values. Unparsable overrides are ignored.
    #[must_use]
    pub fn from_values(
        app_env: Option<&str>,
        log_level: Option<&str>,
        log_format: Option<&str>,
    ) -> Self {
        let mut config = match app_env.and_then(Environment::parse) {
            Some(Environment::Production) => Self::production(),
            _ => Self::default(),
        };

        if let Some(level) = log_level.and_then(|l| Level::from_str(l.trim()).ok()) {
            config.level = level;
        }
        if let Some(format) = log_format.and_then(|f| f.parse().ok()) {
            config.format = format;
        }

        config
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed in this process.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let fmt_layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_span_events(config.span_events())
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_span_events(config.span_events())
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}
