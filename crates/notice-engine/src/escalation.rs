//! Time-window escalation
//!
//! Every in-progress notice is re-classified against "today" on each run.
//! Nothing is cached: the alert for a notice is a pure function of its
//! status, its effect date and the evaluation instant.
//!
//! Windows (days remaining until the effect date):
//! - J-30 (15, 30]: medium, agent
//! - J-15 (7, 15]: medium, agent
//! - J-7 (3, 7]: high, agent
//! - J-3 (1, 3]: critical, manager
//! - J-1 [0, 1]: critical, manager
//! - EXPIRED (< 0): critical, manager

use crate::error::EscalationError;
use chrono::{DateTime, NaiveDate, Utc};
use shared_types::{Alert, NoticeRecord, Priority, RecipientRole, WindowTag};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// A notice that could not be classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeFailure {
    pub notice_id: String,
    pub error: EscalationError,
}

/// Outcome of a bulk evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscalationReport {
    /// Most urgent first: priority, then days remaining, then notice id
    pub alerts: Vec<Alert>,
    pub failures: Vec<NoticeFailure>,
}

impl EscalationReport {
    /// Alerts grouped for the dashboard
    pub fn by_priority(&self) -> BTreeMap<Priority, Vec<Alert>> {
        let mut groups: BTreeMap<Priority, Vec<Alert>> = BTreeMap::new();
        for alert in &self.alerts {
            groups.entry(alert.priority).or_default().push(alert.clone());
        }
        groups
    }

    pub fn for_recipient(&self, role: RecipientRole) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|alert| alert.recipient_role == role)
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EscalationEngine;

impl EscalationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Calendar days from the evaluation date to the effect date
    ///
    /// Time of day is dropped first, so an evaluation at 23:59 and one at
    /// 00:01 on the same date agree.
    pub fn days_remaining(effect_date: NaiveDate, as_of: DateTime<Utc>) -> i64 {
        (effect_date - as_of.date_naive()).num_days()
    }

    /// Classify one notice
    ///
    /// Returns `Ok(None)` for notices that are not in progress or are more
    /// than 30 days out. An in-progress notice without an effect date is a
    /// corrupt record and is reported as an error.
    pub fn evaluate(
        &self,
        notice: &NoticeRecord,
        as_of: DateTime<Utc>,
    ) -> Result<Option<Alert>, EscalationError> {
        if !notice.is_active() {
            return Ok(None);
        }

        let effect_date = notice
            .effect_date
            .ok_or_else(|| EscalationError::MissingEffectDate {
                notice_id: notice.id.clone(),
            })?;
        let days_remaining = Self::days_remaining(effect_date, as_of);

        let Some(window) = WindowTag::classify(days_remaining) else {
            debug!(notice_id = %notice.id, days_remaining, "Notice dormant");
            return Ok(None);
        };

        debug!(notice_id = %notice.id, days_remaining, %window, "Notice escalated");
        Ok(Some(build_alert(notice, effect_date, window, days_remaining, as_of)))
    }

    /// Classify a batch; malformed records are collected, not fatal
    ///
    /// A notice id seen twice is only evaluated the first time.
    pub fn evaluate_all<'n>(
        &self,
        notices: impl IntoIterator<Item = &'n NoticeRecord>,
        as_of: DateTime<Utc>,
    ) -> EscalationReport {
        let mut report = EscalationReport::default();
        let mut seen = HashSet::new();

        for notice in notices {
            if !seen.insert(notice.id.as_str()) {
                debug!(notice_id = %notice.id, "Duplicate notice skipped");
                continue;
            }
            match self.evaluate(notice, as_of) {
                Ok(Some(alert)) => report.alerts.push(alert),
                Ok(None) => {}
                Err(error) => {
                    warn!(notice_id = %notice.id, %error, "Malformed notice skipped");
                    report.failures.push(NoticeFailure {
                        notice_id: notice.id.clone(),
                        error,
                    });
                }
            }
        }

        report.alerts.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.days_remaining.cmp(&b.days_remaining))
                .then_with(|| a.notice_id.cmp(&b.notice_id))
        });
        report
    }
}

fn build_alert(
    notice: &NoticeRecord,
    effect_date: NaiveDate,
    window: WindowTag,
    days_remaining: i64,
    as_of: DateTime<Utc>,
) -> Alert {
    Alert {
        notice_id: notice.id.clone(),
        contract_id: notice.contract_id.clone(),
        tenant_id: notice.tenant_id.clone(),
        effect_date,
        window_tag: window,
        days_remaining,
        message: message(window, &notice.id, days_remaining),
        priority: window.priority(),
        recommended_action: recommended_action(window).to_string(),
        recipient_role: window.recipient(),
        generated_at: as_of,
    }
}

fn message(window: WindowTag, notice_id: &str, days_remaining: i64) -> String {
    match window {
        WindowTag::J30 | WindowTag::J15 => format!(
            "Notice {} takes effect in {} days",
            notice_id, days_remaining
        ),
        WindowTag::J7 => format!(
            "Notice {} takes effect in {} days: departure is imminent",
            notice_id, days_remaining
        ),
        WindowTag::J3 => format!(
            "URGENT: notice {} takes effect in {} days",
            notice_id, days_remaining
        ),
        WindowTag::J1 if days_remaining == 0 => {
            format!("CRITICAL: notice {} takes effect today", notice_id)
        }
        WindowTag::J1 => format!("CRITICAL: notice {} takes effect tomorrow", notice_id),
        WindowTag::Expired => format!(
            "EXPIRED: notice {} took effect {} day(s) ago and is still in progress",
            notice_id,
            days_remaining.unsigned_abs()
        ),
    }
}

fn recommended_action(window: WindowTag) -> &'static str {
    match window {
        WindowTag::J30 => "Confirm the departure date with the tenant and start looking for a new tenant",
        WindowTag::J15 => "Schedule the exit inspection and prepare the deposit statement",
        WindowTag::J7 => "Confirm the exit inspection appointment and meter readings",
        WindowTag::J3 => "Check that the exit inspection and key handover are booked",
        WindowTag::J1 => "Carry out the exit inspection and collect the keys",
        WindowTag::Expired => "Close the notice or escalate: the effect date has passed",
    }
}
