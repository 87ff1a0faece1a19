//! Conversation transcript storage
//!
//! Holds the ordered log of conversation turns. Seeded with a single
//! assistant greeting so the log is never empty after initialization.

use crate::models::Turn;
use chrono::{DateTime, Utc};

/// Opening turn for every fresh conversation.
pub const GREETING: &str =
    "Hello! I'm Air-Buddy, your airport assistant. How can I help you today?";

/// Ordered conversation log. Insertion order is chronological order;
/// sender alternation is not enforced.
#[derive(Debug, Clone)]
pub struct Transcript {
    turns: Vec<Turn>,
    updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Create a transcript seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            turns: vec![Turn::assistant(GREETING)],
            updated_at: Utc::now(),
        }
    }

    /// Append a turn to the end of the log. Never fails.
    pub fn append(&mut self, turn: Turn) -> &[Turn] {
        self.turns.push(turn);
        self.updated_at = Utc::now();
        &self.turns
    }

    /// Replace the log with a single fresh greeting turn, timestamped at
    /// call time with a newly generated id. Never fails.
    pub fn reset(&mut self) -> &[Turn] {
        self.turns.clear();
        self.turns.push(Turn::assistant(GREETING));
        self.updated_at = Utc::now();
        &self.turns
    }

    /// The most recent turn, if any.
    pub fn latest(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// All turns in chronological order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Cloned snapshot of the log, for handing across task boundaries.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
