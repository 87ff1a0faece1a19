//! Reply strategy trait and implementations
//!
//! The pluggable policy that turns a user turn into an assistant turn.
//! The keyword strategy is the primary mode; the canned strategy is a
//! fallback/demo mode that ignores input content entirely.

use crate::matcher::IntentMatcher;
use crate::models::FinancialSnapshot;
use crate::Result;
use async_trait::async_trait;
use rand::seq::SliceRandom;

/// Trait for reply generation
#[async_trait]
pub trait ReplyStrategy: Send + Sync {
    /// Produce the assistant's reply for one user turn.
    async fn reply(&self, input: &str, snapshot: Option<&FinancialSnapshot>) -> Result<String>;
}

/// Keyword-matched replies backed by the intent matcher (primary mode)
pub struct KeywordStrategy;

#[async_trait]
impl ReplyStrategy for KeywordStrategy {
    async fn reply(&self, input: &str, snapshot: Option<&FinancialSnapshot>) -> Result<String> {
        Ok(IntentMatcher::respond(input, snapshot))
    }
}

/// Fixed placeholder sentences for the demo mode
const CANNED_REPLIES: &[&str] = &[
    "Thanks for your message! Air-Buddy operations are running smoothly today.",
    "I've noted that. Is there anything else about the airport I can help with?",
    "Our teams are on it. You can follow live updates on the Operations screen.",
    "Good question! The Dashboard has the latest figures for that.",
    "Understood. Let me know if you need flight, passenger, or financial details.",
];

/// Uniform-random canned replies that ignore the input (fallback/demo mode)
pub struct CannedStrategy;

#[async_trait]
impl ReplyStrategy for CannedStrategy {
    async fn reply(&self, _input: &str, _snapshot: Option<&FinancialSnapshot>) -> Result<String> {
        let reply = CANNED_REPLIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(CANNED_REPLIES[0]);
        Ok(reply.to_string())
    }
}
