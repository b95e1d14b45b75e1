//! # Notice Lifecycle
//!
//! Creation, partial updates and status transitions for a single notice.
//!
//! ## Transition policy
//!
//! Historically the status was a free field restricted only to its five
//! values. [`TransitionPolicy::Strict`] enforces the graph from
//! [`NoticeStatus::allowed_transitions`]; [`TransitionPolicy::Permissive`]
//! keeps the free-field behaviour. Under both policies an archived notice
//! cannot change, and re-asserting the current status is accepted.

use crate::deadline::DeadlineCalculator;
use crate::error::{LifecycleError, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{NoticeRecord, NoticeStatus, NoticeType};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    #[default]
    Strict,
    Permissive,
}

impl TransitionPolicy {
    pub fn permits(&self, from: NoticeStatus, to: NoticeStatus) -> bool {
        if from.is_terminal() {
            return false;
        }
        if from == to {
            return true;
        }
        match self {
            TransitionPolicy::Strict => from.can_transition_to(to),
            TransitionPolicy::Permissive => true,
        }
    }
}

/// Request to issue a new notice
///
/// Every field is optional here so that a missing mandatory field surfaces
/// as a [`ValidationError`] naming it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeDraft {
    pub contract_id: Option<String>,
    pub tenant_id: Option<String>,
    pub jurisdiction_id: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub effect_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub notice_type: Option<NoticeType>,
}

impl NoticeDraft {
    /// Fill a missing effect date with the earliest lawful one
    ///
    /// Uses the jurisdiction's notice-to-quit period from the issue date.
    /// Drafts that already carry an effect date, or have no issue date, are
    /// returned unchanged.
    pub fn with_suggested_effect_date(mut self, calculator: &DeadlineCalculator<'_>) -> Self {
        if self.effect_date.is_none() {
            if let Some(issue_date) = self.issue_date {
                let jurisdiction = self.jurisdiction_id.as_deref().unwrap_or_default();
                let suggested = calculator.minimum_effect_date(jurisdiction, issue_date);
                debug!(jurisdiction, %issue_date, %suggested, "Suggested effect date");
                self.effect_date = Some(suggested);
            }
        }
        self
    }
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeUpdate {
    /// Raw status as received; must parse to one of the five statuses
    pub status: Option<String>,
    pub effect_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub notice_type: Option<NoticeType>,
}

impl NoticeUpdate {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.effect_date.is_none()
            && self.reason.is_none()
            && self.notice_type.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoticeLifecycle {
    policy: TransitionPolicy,
}

impl NoticeLifecycle {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Validate a draft and build the IN_PROGRESS record
    pub fn create(
        &self,
        draft: NoticeDraft,
        now: DateTime<Utc>,
    ) -> Result<NoticeRecord, ValidationError> {
        let contract_id = required_text(draft.contract_id, "contract_id")?;
        let tenant_id = required_text(draft.tenant_id, "tenant_id")?;
        let issue_date = draft
            .issue_date
            .ok_or(ValidationError::MissingField("issue_date"))?;
        let effect_date = draft
            .effect_date
            .ok_or(ValidationError::MissingField("effect_date"))?;
        check_effect_date(issue_date, effect_date)?;

        let record = NoticeRecord {
            id: Uuid::new_v4().to_string(),
            contract_id,
            tenant_id,
            jurisdiction_id: optional_text(draft.jurisdiction_id),
            issue_date,
            effect_date: Some(effect_date),
            reason: optional_text(draft.reason),
            notice_type: draft.notice_type.unwrap_or_default(),
            status: NoticeStatus::InProgress,
            created_at: now,
            updated_at: now,
        };

        info!(
            notice_id = %record.id,
            contract_id = %record.contract_id,
            %effect_date,
            "Notice created"
        );
        Ok(record)
    }

    /// Apply a partial update
    ///
    /// The whole update is validated before anything is written, so a
    /// rejected update leaves the record untouched.
    pub fn apply_update(
        &self,
        record: &mut NoticeRecord,
        update: NoticeUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        if update.is_empty() {
            return Err(ValidationError::EmptyUpdate.into());
        }
        self.require_mutable(record)?;

        let next_status = update
            .status
            .as_deref()
            .map(str::parse::<NoticeStatus>)
            .transpose()
            .map_err(ValidationError::from)?;
        if let Some(next) = next_status {
            self.require_transition(record.status, next)?;
        }
        if let Some(effect_date) = update.effect_date {
            check_effect_date(record.issue_date, effect_date)?;
        }

        if let Some(next) = next_status {
            self.log_transition(record, next);
            record.status = next;
        }
        if let Some(effect_date) = update.effect_date {
            record.effect_date = Some(effect_date);
        }
        if let Some(reason) = update.reason {
            record.reason = optional_text(Some(reason));
        }
        if let Some(notice_type) = update.notice_type {
            record.notice_type = notice_type;
        }
        record.updated_at = now;
        Ok(())
    }

    /// Move a notice to `to`
    pub fn transition(
        &self,
        record: &mut NoticeRecord,
        to: NoticeStatus,
        now: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        self.require_mutable(record)?;
        self.require_transition(record.status, to)?;
        self.log_transition(record, to);
        record.status = to;
        record.updated_at = now;
        Ok(())
    }

    /// Administrative override: archive from any non-terminal status
    pub fn archive(&self, record: &mut NoticeRecord, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        self.transition(record, NoticeStatus::Archived, now)
    }

    fn require_mutable(&self, record: &NoticeRecord) -> Result<(), LifecycleError> {
        if record.status.is_terminal() {
            return Err(LifecycleError::ArchivedImmutable {
                id: record.id.clone(),
            });
        }
        Ok(())
    }

    fn require_transition(&self, from: NoticeStatus, to: NoticeStatus) -> Result<(), LifecycleError> {
        if self.policy.permits(from, to) {
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition { from, to })
        }
    }

    fn log_transition(&self, record: &NoticeRecord, to: NoticeStatus) {
        if record.status != to {
            info!(notice_id = %record.id, from = %record.status, %to, "Notice status changed");
        }
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    optional_text(value).ok_or(ValidationError::MissingField(field))
}

/// Blank strings count as absent
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn check_effect_date(issue_date: NaiveDate, effect_date: NaiveDate) -> Result<(), ValidationError> {
    if effect_date < issue_date {
        return Err(ValidationError::EffectBeforeIssue {
            issue_date,
            effect_date,
        });
    }
    Ok(())
}
