//! Error types for the Air-Buddy assistant

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {

    // =============================
    // Core Errors
    // =============================

    #[error("Reply generation error: {0}")]
    ReplyError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Preference store error: {0}")]
    PreferenceError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
