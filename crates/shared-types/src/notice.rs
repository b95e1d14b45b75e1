//! Termination notices ("notices to quit") as exchanged with the storage layer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of a notice
///
/// ```text
/// IN_PROGRESS ──▶ SENT ──▶ ACCEPTED ──▶ ARCHIVED
///      ▲            │
///      │            └──▶ DISPUTED ──▶ ARCHIVED
///      └────────────────────┘
/// ```
///
/// Any non-terminal status may also move straight to `ARCHIVED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeStatus {
    InProgress,
    Sent,
    Accepted,
    Disputed,
    Archived,
}

impl NoticeStatus {
    pub const ALL: [NoticeStatus; 5] = [
        NoticeStatus::InProgress,
        NoticeStatus::Sent,
        NoticeStatus::Accepted,
        NoticeStatus::Disputed,
        NoticeStatus::Archived,
    ];

    /// Wire name, e.g. `IN_PROGRESS`
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeStatus::InProgress => "IN_PROGRESS",
            NoticeStatus::Sent => "SENT",
            NoticeStatus::Accepted => "ACCEPTED",
            NoticeStatus::Disputed => "DISPUTED",
            NoticeStatus::Archived => "ARCHIVED",
        }
    }

    /// Archived notices are immutable
    pub fn is_terminal(&self) -> bool {
        matches!(self, NoticeStatus::Archived)
    }

    /// Only in-progress notices are escalated
    pub fn is_active(&self) -> bool {
        matches!(self, NoticeStatus::InProgress)
    }

    /// Statuses reachable in one step under the strict transition graph
    pub fn allowed_transitions(&self) -> &'static [NoticeStatus] {
        match self {
            NoticeStatus::InProgress => &[NoticeStatus::Sent, NoticeStatus::Archived],
            NoticeStatus::Sent => &[
                NoticeStatus::Accepted,
                NoticeStatus::Disputed,
                NoticeStatus::Archived,
            ],
            NoticeStatus::Accepted => &[NoticeStatus::Archived],
            NoticeStatus::Disputed => &[NoticeStatus::InProgress, NoticeStatus::Archived],
            NoticeStatus::Archived => &[],
        }
    }

    pub fn can_transition_to(&self, next: NoticeStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }
}

impl std::fmt::Display for NoticeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string outside the five enumerated values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notice status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for NoticeStatus {
    type Err = ParseStatusError;

    /// Accepts the wire names case-insensitively (`SENT`, `sent`, `In_Progress`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        NoticeStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// Why the tenancy is ending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeType {
    /// Tenant leaves of their own accord
    #[default]
    TenantDeparture,
    /// Landlord ends the lease at term
    LandlordTermination,
    /// Termination for breach (non-payment, damage)
    Eviction,
    Other,
}

impl NoticeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeType::TenantDeparture => "tenant_departure",
            NoticeType::LandlordTermination => "landlord_termination",
            NoticeType::Eviction => "eviction",
            NoticeType::Other => "other",
        }
    }
}

/// One issued termination notice
///
/// `effect_date` is optional at the type level because rows handed back by
/// storage are not trusted; records built through the lifecycle always
/// carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeRecord {
    pub id: String,
    pub contract_id: String,
    pub tenant_id: String,
    /// Resolved from the contract's site, e.g. `GN_CONAKRY`
    pub jurisdiction_id: Option<String>,
    pub issue_date: NaiveDate,
    pub effect_date: Option<NaiveDate>,
    pub reason: Option<String>,
    #[serde(default)]
    pub notice_type: NoticeType,
    pub status: NoticeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoticeRecord {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whole calendar days from `today` until the effect date (negative once past)
    pub fn days_until_effect(&self, today: NaiveDate) -> Option<i64> {
        self.effect_date
            .map(|effect_date| (effect_date - today).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("SENT".parse::<NoticeStatus>(), Ok(NoticeStatus::Sent));
        assert_eq!("in_progress".parse::<NoticeStatus>(), Ok(NoticeStatus::InProgress));
        assert_eq!(" Archived ".parse::<NoticeStatus>(), Ok(NoticeStatus::Archived));
    }

    #[test]
    fn test_status_parsing_rejects_unknown_values() {
        assert_eq!(
            "CANCELLED".parse::<NoticeStatus>(),
            Err(ParseStatusError("CANCELLED".to_string()))
        );
        assert!("".parse::<NoticeStatus>().is_err());
        assert!("IN PROGRESS".parse::<NoticeStatus>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&NoticeStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let parsed: NoticeStatus = serde_json::from_str("\"DISPUTED\"").unwrap();
        assert_eq!(parsed, NoticeStatus::Disputed);
    }

    #[test]
    fn test_archived_is_the_only_terminal_status() {
        for status in NoticeStatus::ALL {
            assert_eq!(status.is_terminal(), status == NoticeStatus::Archived);
        }
        assert!(NoticeStatus::Archived.allowed_transitions().is_empty());
    }

    #[test]
    fn test_every_non_terminal_status_can_be_archived() {
        for status in NoticeStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(
                status.can_transition_to(NoticeStatus::Archived),
                "{} should be archivable",
                status
            );
        }
    }

    #[test]
    fn test_disputed_can_restart() {
        assert!(NoticeStatus::Disputed.can_transition_to(NoticeStatus::InProgress));
        assert!(!NoticeStatus::Accepted.can_transition_to(NoticeStatus::InProgress));
        assert!(!NoticeStatus::Archived.can_transition_to(NoticeStatus::InProgress));
    }

    #[test]
    fn test_notice_type_defaults_to_tenant_departure() {
        assert_eq!(NoticeType::default(), NoticeType::TenantDeparture);
        assert_eq!(NoticeType::default().as_str(), "tenant_departure");
    }

    #[test]
    fn test_days_until_effect() {
        let now = Utc::now();
        let record = NoticeRecord {
            id: "n-1".to_string(),
            contract_id: "c-1".to_string(),
            tenant_id: "t-1".to_string(),
            jurisdiction_id: None,
            issue_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            effect_date: NaiveDate::from_ymd_opt(2025, 3, 31),
            reason: None,
            notice_type: NoticeType::TenantDeparture,
            status: NoticeStatus::InProgress,
            created_at: now,
            updated_at: now,
        };
        let today = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
        assert_eq!(record.days_until_effect(today), Some(10));

        let later = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        assert_eq!(record.days_until_effect(later), Some(-2));

        let corrupt = NoticeRecord {
            effect_date: None,
            ..record
        };
        assert_eq!(corrupt.days_until_effect(today), None);
    }
}
