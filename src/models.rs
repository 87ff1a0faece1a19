//! Core data models for the Air-Buddy assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Enums =================
//

/// Author of a conversation turn. The analytics frontend serializes the
/// assistant side as `"ai"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai")]
    Assistant,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
}

//
// ================= Turn =================
//

/// One message in the conversation log. Immutable once created; the log
/// only grows or is reset to the seeded greeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }
}

//
// ================= Financial Snapshot =================
//

/// Point-in-time financial figures pushed by the analytics feed.
/// Read-only to the matcher; absence is handled gracefully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub revenue: Revenue,
    pub expenses: Expenses,
    pub profit: Profit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revenue {
    pub total: f64,
    pub aeronautical: f64,
    #[serde(rename = "nonAeronautical")]
    pub non_aeronautical: f64,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Expense totals plus a positional breakdown. The UI expects a fixed
/// breakdown shape of at least 4 categories: index 0 is Infrastructure
/// and index 3 is Salaries. The matcher reads those indices directly and
/// panics on a shorter breakdown; callers must guarantee the shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expenses {
    pub total: f64,
    pub breakdown: Vec<BreakdownEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profit {
    pub total: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub amount: f64,
}

//
// ================= Alerts =================
//

/// Short-lived toast-style notification event. Fire-and-forget; never
/// affects conversation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
}

impl Alert {
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: AlertSeverity::Error,
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Error => "error",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sender::User => "user",
            Sender::Assistant => "ai",
        };
        write!(f, "{}", s)
    }
}
