//! Notification sink
//!
//! Fire-and-forget delivery of toast-style alerts raised by the
//! dispatcher. Sinks are injected explicitly so wiring and testing never
//! require ambient lookup.

use crate::models::Alert;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Trait for alert delivery
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert. Must not affect conversation state.
    async fn emit(&self, alert: Alert);
}

/// Sink that surfaces alerts through the tracing pipeline
pub struct TracingAlertSink;

#[async_trait]
impl AlertSink for TracingAlertSink {
    async fn emit(&self, alert: Alert) {
        warn!(
            title = %alert.title,
            severity = %alert.severity,
            "{}",
            alert.description
        );
    }
}

/// In-memory sink retaining alerts in arrival order
pub struct BufferedAlertSink {
    alerts: Arc<RwLock<Vec<Alert>>>,
}

impl BufferedAlertSink {
    pub fn new() -> Self {
        Self {
            alerts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// All alerts delivered so far, oldest first.
    pub async fn drain(&self) -> Vec<Alert> {
        let mut alerts = self.alerts.write().await;
        std::mem::take(&mut *alerts)
    }

    pub async fn len(&self) -> usize {
        self.alerts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.alerts.read().await.is_empty()
    }
}

impl Default for BufferedAlertSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertSink for BufferedAlertSink {
    async fn emit(&self, alert: Alert) {
        let mut alerts = self.alerts.write().await;
        alerts.push(alert);
    }
}
