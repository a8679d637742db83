//! Configuration structs

mod app_config;

pub use app_config::{
    redact_url, AppConfig, AppSettings, ChannelConfig, ConfigError, Environment, RedisConfig,
    RelayConfig, SlackConfig,
};
