//! Notice-to-quit deadlines and escalation for West African rental markets
//!
//! Computes jurisdiction-aware legal deadlines (business days, public
//! holidays, statutory periods) and classifies in-progress notices into
//! escalation windows as the effect date approaches.

pub mod calendar;
pub mod deadline;
pub mod error;
pub mod escalation;
pub mod jurisdiction;
pub mod lifecycle;
pub mod regions;
pub mod store;
pub mod sweep;

#[cfg(test)]
mod test_support;

pub use calendar::BusinessCalendar;
pub use deadline::DeadlineCalculator;
pub use error::{ConfigError, EscalationError, LifecycleError, RepositoryError, ValidationError};
pub use escalation::{EscalationEngine, EscalationReport, NoticeFailure};
pub use jurisdiction::{DeadlineCategory, PaymentMethod, RegionalConfig, TaxCategory};
pub use lifecycle::{NoticeDraft, NoticeLifecycle, NoticeUpdate, TransitionPolicy};
pub use store::RegionalConfigStore;
pub use sweep::{AlertSink, EscalationSweep, InMemoryNoticeRepository, NoticeRepository, SweepSummary};

use chrono::{DateTime, NaiveDate, Utc};
use shared_types::{Alert, NoticeRecord, Priority};
use std::collections::BTreeMap;
use tracing::warn;

/// NoticeEngine entry point
#[derive(Debug, Clone, Copy)]
pub struct NoticeEngine<'a> {
    store: &'a RegionalConfigStore,
    lifecycle: NoticeLifecycle,
    escalation: EscalationEngine,
}

impl NoticeEngine<'static> {
    /// Engine over the built-in regional table
    pub fn builtin() -> Self {
        Self::new(RegionalConfigStore::global())
    }
}

impl<'a> NoticeEngine<'a> {
    pub fn new(store: &'a RegionalConfigStore) -> Self {
        Self {
            store,
            lifecycle: NoticeLifecycle::default(),
            escalation: EscalationEngine::new(),
        }
    }

    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.lifecycle = NoticeLifecycle::new(policy);
        self
    }

    pub fn store(&self) -> &'a RegionalConfigStore {
        self.store
    }

    pub fn calendar(&self) -> BusinessCalendar<'a> {
        BusinessCalendar::new(self.store)
    }

    pub fn deadlines(&self) -> DeadlineCalculator<'a> {
        DeadlineCalculator::new(self.store)
    }

    pub fn lifecycle(&self) -> &NoticeLifecycle {
        &self.lifecycle
    }

    /// Create a notice, suggesting the effect date when none is given
    ///
    /// An effect date earlier than the legal notice period is accepted
    /// but logged.
    pub fn create_notice(
        &self,
        draft: NoticeDraft,
        now: DateTime<Utc>,
    ) -> Result<NoticeRecord, ValidationError> {
        let record = self
            .lifecycle
            .create(draft.with_suggested_effect_date(&self.deadlines()), now)?;
        self.check_notice_period(&record);
        Ok(record)
    }

    /// Apply a partial update
    ///
    /// A changed effect date gets the same advisory notice-period check as
    /// [`NoticeEngine::create_notice`].
    pub fn update_notice(
        &self,
        record: &mut NoticeRecord,
        update: NoticeUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        let effect_date_changed = update.effect_date.is_some();
        self.lifecycle.apply_update(record, update, now)?;
        if effect_date_changed {
            self.check_notice_period(record);
        }
        Ok(())
    }

    pub fn compute_deadline(
        &self,
        jurisdiction_id: &str,
        anchor: NaiveDate,
        category: DeadlineCategory,
    ) -> NaiveDate {
        self.deadlines()
            .compute_deadline(jurisdiction_id, anchor, category)
    }

    pub fn evaluate(
        &self,
        notice: &NoticeRecord,
        as_of: DateTime<Utc>,
    ) -> Result<Option<Alert>, EscalationError> {
        self.escalation.evaluate(notice, as_of)
    }

    pub fn evaluate_all<'n>(
        &self,
        notices: impl IntoIterator<Item = &'n NoticeRecord>,
        as_of: DateTime<Utc>,
    ) -> EscalationReport {
        self.escalation.evaluate_all(notices, as_of)
    }

    /// Current alerts grouped by priority
    pub fn dashboard<'n>(
        &self,
        notices: impl IntoIterator<Item = &'n NoticeRecord>,
        as_of: DateTime<Utc>,
    ) -> BTreeMap<Priority, Vec<Alert>> {
        self.evaluate_all(notices, as_of).by_priority()
    }

    /// Escalation sweep over a repository
    pub fn sweep(
        &self,
        repository: &dyn NoticeRepository,
        sink: &dyn AlertSink,
        as_of: DateTime<Utc>,
    ) -> Result<SweepSummary, RepositoryError> {
        EscalationSweep::new(self.escalation).run(repository, sink, as_of)
    }

    /// Warn when the effect date is shorter than the legal notice period
    fn check_notice_period(&self, record: &NoticeRecord) {
        let Some(effect_date) = record.effect_date else {
            return;
        };
        let deadlines = self.deadlines();
        let jurisdiction = record.jurisdiction_id.as_deref().unwrap_or_default();
        if !deadlines.meets_legal_minimum(
            jurisdiction,
            record.issue_date,
            effect_date,
            DeadlineCategory::NoticeToQuit,
        ) {
            warn!(
                notice_id = %record.id,
                jurisdiction,
                %effect_date,
                minimum = %deadlines.minimum_effect_date(jurisdiction, record.issue_date),
                "Effect date is shorter than the legal notice period"
            );
        }
    }
}
