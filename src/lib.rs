//! Air-Buddy Assistant
//!
//! Conversational core of the Air-Buddy airport operations console:
//! - Ordered conversation transcript seeded with an assistant greeting
//! - Keyword intent matcher with a financial sub-matcher over a
//!   read-only analytics snapshot
//! - Turn-taking dispatcher with simulated reply latency, cancellation
//!   on reset, and soft failure recovery
//! - Pluggable reply strategies (keyword-driven or canned placeholders)
//!
//! FLOW:
//! INPUT → APPEND USER TURN → DELAY → MATCH → APPEND REPLY

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod matcher;
pub mod models;
pub mod notify;
pub mod prefs;
pub mod strategy;
pub mod transcript;

pub use error::{AssistantError, Result};

// Re-export common types
pub use dispatcher::Dispatcher;
pub use matcher::IntentMatcher;
pub use models::*;
pub use strategy::{CannedStrategy, KeywordStrategy, ReplyStrategy};
pub use transcript::Transcript;
