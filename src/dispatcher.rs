//! Conversation dispatcher
//!
//! Orchestrates turn-taking: appends the user turn, schedules reply
//! generation behind a simulated delay, then appends the assistant turn.
//! Two states, Idle and AwaitingReply; sends are ignored while a reply is
//! pending. A monotonically increasing generation token guards against a
//! stale reply appending after a reset.

use crate::models::{Alert, FinancialSnapshot, Turn};
use crate::notify::AlertSink;
use crate::strategy::ReplyStrategy;
use crate::transcript::Transcript;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

/// Assistant turn appended when reply generation fails.
pub const APOLOGY: &str =
    "I'm sorry, I encountered an error processing your request. Please try again.";

/// Default simulated reply latency. A tunable, not a contract.
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;

struct Inner {
    transcript: Transcript,
    snapshot: Option<FinancialSnapshot>,
    awaiting_reply: bool,
    generation: u64,
}

/// Single-conversation dispatcher. One instance owns one conversation;
/// cloneable handles are obtained by wrapping in `Arc`.
pub struct Dispatcher {
    inner: Arc<RwLock<Inner>>,
    strategy: Arc<dyn ReplyStrategy>,
    alerts: Arc<dyn AlertSink>,
    reply_delay: Duration,
    composing_tx: Arc<watch::Sender<bool>>,
}

impl Dispatcher {
    pub fn new(
        strategy: Arc<dyn ReplyStrategy>,
        alerts: Arc<dyn AlertSink>,
        reply_delay: Duration,
    ) -> Self {
        let (composing_tx, _) = watch::channel(false);

        Self {
            inner: Arc::new(RwLock::new(Inner {
                transcript: Transcript::new(),
                snapshot: None,
                awaiting_reply: false,
                generation: 0,
            })),
            strategy,
            alerts,
            reply_delay,
            composing_tx: Arc::new(composing_tx),
        }
    }

    /// Submit a user message. Returns `false` without any state change when
    /// the text trims to empty or a reply is already pending; otherwise
    /// appends the user turn and schedules the assistant reply.
    pub async fn send(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Ignoring empty message");
            return false;
        }

        // The composing flag is updated while the state lock is held so it
        // stays atomic with the transition; a concurrent reset can then
        // never leave the flag pointing the wrong way.
        let token = {
            let mut inner = self.inner.write().await;
            if inner.awaiting_reply {
                debug!("Ignoring send while a reply is pending");
                return false;
            }

            inner.transcript.append(Turn::user(trimmed));
            inner.awaiting_reply = true;
            self.composing_tx.send_replace(true);
            inner.generation
        };

        info!(generation = token, "User turn accepted, scheduling reply");

        let inner = Arc::clone(&self.inner);
        let strategy = Arc::clone(&self.strategy);
        let alerts = Arc::clone(&self.alerts);
        let composing_tx = Arc::clone(&self.composing_tx);
        let delay = self.reply_delay;
        let input = trimmed.to_string();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // Snapshot is read at reply time, matching the analytics feed
            // the conversation currently sees.
            let snapshot = {
                let guard = inner.read().await;
                if guard.generation != token {
                    debug!(generation = token, "Reply cancelled by reset");
                    return;
                }
                guard.snapshot.clone()
            };

            let reply = strategy.reply(&input, snapshot.as_ref()).await;

            let failed = {
                let mut guard = inner.write().await;
                if guard.generation != token {
                    debug!(generation = token, "Reply cancelled by reset");
                    return;
                }

                let failed = match reply {
                    Ok(answer) => {
                        guard.transcript.append(Turn::assistant(answer));
                        false
                    }
                    Err(error) => {
                        warn!("Reply generation failed: {}", error);
                        guard.transcript.append(Turn::assistant(APOLOGY));
                        true
                    }
                };

                guard.awaiting_reply = false;
                composing_tx.send_replace(false);
                failed
            };

            if failed {
                alerts
                    .emit(Alert::error("Error", "Failed to process the request"))
                    .await;
            }
        });

        true
    }

    /// Reset to the seeded greeting. Callable from either state; bumps the
    /// generation token so any in-flight reply is discarded.
    pub async fn reset(&self) {
        {
            let mut inner = self.inner.write().await;
            inner.generation += 1;
            inner.transcript.reset();
            inner.awaiting_reply = false;
            self.composing_tx.send_replace(false);
        }
        info!("Conversation reset");
    }

    /// Replace the financial snapshot the matcher reads.
    pub async fn set_snapshot(&self, snapshot: FinancialSnapshot) {
        let mut inner = self.inner.write().await;
        inner.snapshot = Some(snapshot);
    }

    /// Ordered copy of the conversation log.
    pub async fn transcript(&self) -> Vec<Turn> {
        self.inner.read().await.transcript.snapshot()
    }

    /// Most recent turn.
    pub async fn latest(&self) -> Option<Turn> {
        self.inner.read().await.transcript.latest().cloned()
    }

    /// Whether the assistant is currently composing a reply.
    pub fn is_composing(&self) -> bool {
        *self.composing_tx.borrow()
    }

    /// Subscribe to composing-flag changes (drives the typing indicator).
    pub fn composing_changes(&self) -> watch::Receiver<bool> {
        self.composing_tx.subscribe()
    }

    /// Wait until no reply is pending. Returns immediately when idle.
    pub async fn wait_until_idle(&self) {
        let mut rx = self.composing_tx.subscribe();
        loop {
            if !*rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;
    use crate::notify::BufferedAlertSink;
    use crate::strategy::KeywordStrategy;
    use crate::transcript::GREETING;
    use crate::{AssistantError, Result};
    use async_trait::async_trait;

    struct FailingStrategy;

    #[async_trait]
    impl ReplyStrategy for FailingStrategy {
        async fn reply(
            &self,
            _input: &str,
            _snapshot: Option<&FinancialSnapshot>,
        ) -> Result<String> {
            Err(AssistantError::ReplyError("simulated failure".to_string()))
        }
    }

    fn dispatcher_with(
        strategy: Arc<dyn ReplyStrategy>,
    ) -> (Dispatcher, Arc<BufferedAlertSink>) {
        let alerts = Arc::new(BufferedAlertSink::new());
        let dispatcher = Dispatcher::new(
            strategy,
            alerts.clone(),
            Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
        );
        (dispatcher, alerts)
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_cycle_appends_two_turns() {
        let (dispatcher, _) = dispatcher_with(Arc::new(KeywordStrategy));

        assert!(dispatcher.send("hello").await);
        dispatcher.wait_until_idle().await;

        let turns = dispatcher.transcript().await;
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].sender, Sender::User);
        assert_eq!(turns[1].text, "hello");
        assert_eq!(turns[2].sender, Sender::Assistant);
        assert!(!dispatcher.is_composing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_trims_input() {
        let (dispatcher, _) = dispatcher_with(Arc::new(KeywordStrategy));

        assert!(dispatcher.send("   hello   ").await);
        dispatcher.wait_until_idle().await;

        let turns = dispatcher.transcript().await;
        assert_eq!(turns[1].text, "hello");
    }

    #[tokio::test]
    async fn test_empty_send_is_a_no_op() {
        let (dispatcher, _) = dispatcher_with(Arc::new(KeywordStrategy));

        assert!(!dispatcher.send("").await);
        assert!(!dispatcher.send("   \t\n ").await);

        assert_eq!(dispatcher.transcript().await.len(), 1);
        assert!(!dispatcher.is_composing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_ignored_while_awaiting_reply() {
        let (dispatcher, _) = dispatcher_with(Arc::new(KeywordStrategy));

        assert!(dispatcher.send("first").await);
        assert!(dispatcher.is_composing());
        assert!(!dispatcher.send("second").await);

        dispatcher.wait_until_idle().await;

        let turns = dispatcher.transcript().await;
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].text, "first");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_reply() {
        let (dispatcher, _) = dispatcher_with(Arc::new(KeywordStrategy));

        assert!(dispatcher.send("hello").await);
        dispatcher.reset().await;

        // Wait well past the original delay; the stale reply must not land.
        tokio::time::sleep(Duration::from_millis(DEFAULT_REPLY_DELAY_MS * 3)).await;

        let turns = dispatcher.transcript().await;
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].text, GREETING);
        assert!(!dispatcher.is_composing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_appends_apology_and_alerts() {
        let (dispatcher, alerts) = dispatcher_with(Arc::new(FailingStrategy));

        assert!(dispatcher.send("hello").await);
        dispatcher.wait_until_idle().await;

        let turns = dispatcher.transcript().await;
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[2].text, APOLOGY);
        assert!(!dispatcher.is_composing());

        // Alert emission happens after the composing flag drops; yield so
        // the spawned task finishes delivery.
        tokio::task::yield_now().await;
        let delivered = alerts.drain().await;
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].title, "Error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_feeds_the_matcher() {
        let (dispatcher, _) = dispatcher_with(Arc::new(KeywordStrategy));

        let snapshot = FinancialSnapshot {
            revenue: crate::models::Revenue {
                total: 5_000_000.0,
                aeronautical: 2_000_000.0,
                non_aeronautical: 3_000_000.0,
                breakdown: vec![],
            },
            expenses: crate::models::Expenses {
                total: 3_750_000.0,
                breakdown: vec![],
            },
            profit: crate::models::Profit {
                total: 1_250_000.0,
                margin: 25.0,
            },
        };
        dispatcher.set_snapshot(snapshot).await;

        assert!(dispatcher.send("what is our profit?").await);
        dispatcher.wait_until_idle().await;

        let latest = dispatcher.latest().await.unwrap();
        assert!(latest.text.contains("$1,250,000"));
        assert!(latest.text.contains("25.0%"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_send_and_reset_settle_to_idle() {
        let alerts = Arc::new(BufferedAlertSink::new());
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::new(KeywordStrategy),
            alerts,
            Duration::from_millis(1),
        ));

        // Interleave sends and resets on real threads. The composing flag
        // moves only under the state lock, so every interleaving must end
        // with the dispatcher idle; a flag stuck out of step with
        // `awaiting_reply` would hang the wait below.
        for _ in 0..100 {
            let sender = Arc::clone(&dispatcher);
            let resetter = Arc::clone(&dispatcher);
            let send = tokio::spawn(async move { sender.send("hello").await });
            let reset = tokio::spawn(async move { resetter.reset().await });
            let _ = tokio::join!(send, reset);

            tokio::time::timeout(Duration::from_secs(1), dispatcher.wait_until_idle())
                .await
                .expect("dispatcher did not settle to idle");
            assert!(!dispatcher.is_composing());

            dispatcher.reset().await;
            assert_eq!(dispatcher.transcript().await.len(), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_after_reset_starts_fresh_cycle() {
        let (dispatcher, _) = dispatcher_with(Arc::new(KeywordStrategy));

        assert!(dispatcher.send("hello").await);
        dispatcher.reset().await;
        assert!(dispatcher.send("how's the weather?").await);
        dispatcher.wait_until_idle().await;

        let turns = dispatcher.transcript().await;
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].text, "how's the weather?");
        assert_eq!(turns[2].sender, Sender::Assistant);
    }
}
