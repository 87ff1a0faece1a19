//! Runtime configuration
//!
//! Environment-driven settings with defaults that keep the assistant
//! functional out of the box.

use crate::strategy::{CannedStrategy, KeywordStrategy, ReplyStrategy};
use crate::{AssistantError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Which reply strategy drives the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    /// Keyword/financial-driven replies (primary mode)
    Keyword,
    /// Random placeholder replies (fallback/demo mode)
    Canned,
}

impl ReplyMode {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "canned" | "random" | "demo" => ReplyMode::Canned,
            _ => ReplyMode::Keyword,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Simulated reply latency in milliseconds. A tunable, not a contract.
    pub reply_delay_ms: u64,
    pub reply_mode: ReplyMode,
    pub port: u16,
    pub preferences_path: PathBuf,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: crate::dispatcher::DEFAULT_REPLY_DELAY_MS,
            reply_mode: ReplyMode::Keyword,
            port: 8080,
            preferences_path: PathBuf::from("preferences.json"),
        }
    }
}

impl AssistantConfig {
    /// Build configuration from environment variables. Unset variables
    /// fall back to defaults; set-but-unparseable numeric values are a
    /// configuration error rather than a silent default.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let reply_delay_ms = match std::env::var("REPLY_DELAY_MS") {
            Ok(value) => value.parse().map_err(|_| {
                AssistantError::ConfigError(format!("Invalid REPLY_DELAY_MS: {}", value))
            })?,
            Err(_) => defaults.reply_delay_ms,
        };

        let reply_mode = std::env::var("REPLY_MODE")
            .map(|v| ReplyMode::parse(&v))
            .unwrap_or(defaults.reply_mode);

        let port = match std::env::var("PORT").or_else(|_| std::env::var("API_PORT")) {
            Ok(value) => value
                .parse()
                .map_err(|_| AssistantError::ConfigError(format!("Invalid port: {}", value)))?,
            Err(_) => defaults.port,
        };

        let preferences_path = std::env::var("PREFERENCES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.preferences_path);

        Ok(Self {
            reply_delay_ms,
            reply_mode,
            port,
            preferences_path,
        })
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Instantiate the configured reply strategy.
    pub fn build_strategy(&self) -> Arc<dyn ReplyStrategy> {
        match self.reply_mode {
            ReplyMode::Keyword => Arc::new(KeywordStrategy),
            ReplyMode::Canned => Arc::new(CannedStrategy),
        }
    }
}
