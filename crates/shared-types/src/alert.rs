//! Escalation alerts
//!
//! Alerts are computed on every evaluation and never stored; they are
//! handed to the dashboard and to the delivery channels as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Urgency band for the days remaining before a notice takes effect
///
/// The bands are half-open and contiguous, so any day count falls in at
/// most one of them:
///
/// | tag     | days remaining |
/// |---------|----------------|
/// | J-30    | 15 < d ≤ 30    |
/// | J-15    | 7 < d ≤ 15     |
/// | J-7     | 3 < d ≤ 7      |
/// | J-3     | 1 < d ≤ 3      |
/// | J-1     | 0 ≤ d ≤ 1      |
/// | EXPIRED | d < 0          |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WindowTag {
    #[serde(rename = "J-30")]
    J30,
    #[serde(rename = "J-15")]
    J15,
    #[serde(rename = "J-7")]
    J7,
    #[serde(rename = "J-3")]
    J3,
    #[serde(rename = "J-1")]
    J1,
    #[serde(rename = "EXPIRED")]
    Expired,
}

impl WindowTag {
    pub const ALL: [WindowTag; 6] = [
        WindowTag::J30,
        WindowTag::J15,
        WindowTag::J7,
        WindowTag::J3,
        WindowTag::J1,
        WindowTag::Expired,
    ];

    /// Farthest day count that still escalates
    pub const HORIZON_DAYS: i64 = 30;

    /// Band for a day count, `None` while the notice is still dormant (> 30 days)
    pub fn classify(days_remaining: i64) -> Option<WindowTag> {
        match days_remaining {
            16..=30 => Some(WindowTag::J30),
            8..=15 => Some(WindowTag::J15),
            4..=7 => Some(WindowTag::J7),
            2..=3 => Some(WindowTag::J3),
            0..=1 => Some(WindowTag::J1),
            i64::MIN..=-1 => Some(WindowTag::Expired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowTag::J30 => "J-30",
            WindowTag::J15 => "J-15",
            WindowTag::J7 => "J-7",
            WindowTag::J3 => "J-3",
            WindowTag::J1 => "J-1",
            WindowTag::Expired => "EXPIRED",
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            WindowTag::J30 | WindowTag::J15 => Priority::Medium,
            WindowTag::J7 => Priority::High,
            WindowTag::J3 | WindowTag::J1 | WindowTag::Expired => Priority::Critical,
        }
    }

    pub fn recipient(&self) -> RecipientRole {
        match self {
            WindowTag::J30 | WindowTag::J15 | WindowTag::J7 => RecipientRole::Agent,
            WindowTag::J3 | WindowTag::J1 | WindowTag::Expired => RecipientRole::Manager,
        }
    }
}

impl std::fmt::Display for WindowTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who receives an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientRole {
    Agent,
    Manager,
}

impl std::fmt::Display for RecipientRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipientRole::Agent => f.write_str("agent"),
            RecipientRole::Manager => f.write_str("manager"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub notice_id: String,
    pub contract_id: String,
    pub tenant_id: String,
    pub effect_date: NaiveDate,
    pub window_tag: WindowTag,
    pub days_remaining: i64,
    pub message: String,
    pub priority: Priority,
    pub recommended_action: String,
    pub recipient_role: RecipientRole,
    pub generated_at: DateTime<Utc>,
}
