//! Persistence and notification seams, and the periodic escalation sweep
//!
//! The engine does not own storage or delivery. Embedding services plug a
//! [`NoticeRepository`] and an [`AlertSink`] in; [`InMemoryNoticeRepository`]
//! covers tests and single-process use.

use crate::error::RepositoryError;
use crate::escalation::{EscalationEngine, EscalationReport};
use chrono::{DateTime, Utc};
use shared_types::{Alert, NoticeRecord, NoticeStatus};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::{error, info};

/// Storage for notice records, keyed by notice id
pub trait NoticeRepository: Send + Sync {
    fn insert(&self, record: NoticeRecord) -> Result<(), RepositoryError>;

    fn get(&self, id: &str) -> Result<NoticeRecord, RepositoryError>;

    /// Replace an existing record
    fn update(&self, record: NoticeRecord) -> Result<(), RepositoryError>;

    /// Remove a record, returning what was stored
    fn delete(&self, id: &str) -> Result<NoticeRecord, RepositoryError>;

    fn list_by_status(&self, status: NoticeStatus) -> Result<Vec<NoticeRecord>, RepositoryError>;
}

/// Turns an alert into an email, SMS or chat message
pub trait AlertSink: Send + Sync {
    fn deliver(&self, alert: &Alert) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryNoticeRepository {
    records: RwLock<BTreeMap<String, NoticeRecord>>,
}

impl InMemoryNoticeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NoticeRepository for InMemoryNoticeRepository {
    fn insert(&self, record: NoticeRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.write().map_err(|_| RepositoryError::Poisoned)?;
        if records.contains_key(&record.id) {
            return Err(RepositoryError::Duplicate(record.id));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<NoticeRecord, RepositoryError> {
        let records = self.records.read().map_err(|_| RepositoryError::Poisoned)?;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    fn update(&self, record: NoticeRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.write().map_err(|_| RepositoryError::Poisoned)?;
        match records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(record.id)),
        }
    }

    fn delete(&self, id: &str) -> Result<NoticeRecord, RepositoryError> {
        let mut records = self.records.write().map_err(|_| RepositoryError::Poisoned)?;
        records
            .remove(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    fn list_by_status(&self, status: NoticeStatus) -> Result<Vec<NoticeRecord>, RepositoryError> {
        let records = self.records.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(records
            .values()
            .filter(|record| record.status == status)
            .cloned()
            .collect())
    }
}

/// Counters from one sweep run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub evaluated: usize,
    pub alerted: usize,
    pub delivered: usize,
    pub delivery_failures: usize,
    pub malformed: usize,
    pub report: EscalationReport,
}

/// Daily job: classify every in-progress notice and hand alerts to the sink
#[derive(Debug, Clone, Copy, Default)]
pub struct EscalationSweep {
    engine: EscalationEngine,
}

impl EscalationSweep {
    pub fn new(engine: EscalationEngine) -> Self {
        Self { engine }
    }

    /// Run one sweep
    ///
    /// Only a failure to list notices aborts the run. Malformed records and
    /// failed deliveries are counted and logged.
    pub fn run(
        &self,
        repository: &dyn NoticeRepository,
        sink: &dyn AlertSink,
        as_of: DateTime<Utc>,
    ) -> Result<SweepSummary, RepositoryError> {
        let notices = repository.list_by_status(NoticeStatus::InProgress)?;
        let report = self.engine.evaluate_all(&notices, as_of);

        let mut delivered = 0;
        let mut delivery_failures = 0;
        for alert in &report.alerts {
            match sink.deliver(alert) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    delivery_failures += 1;
                    error!(
                        notice_id = %alert.notice_id,
                        window = %alert.window_tag,
                        "Alert delivery failed: {:#}",
                        e
                    );
                }
            }
        }

        let summary = SweepSummary {
            evaluated: notices.len(),
            alerted: report.alerts.len(),
            delivered,
            delivery_failures,
            malformed: report.failures.len(),
            report,
        };

        info!(
            %as_of,
            evaluated = summary.evaluated,
            alerted = summary.alerted,
            delivered = summary.delivered,
            delivery_failures = summary.delivery_failures,
            malformed = summary.malformed,
            "Escalation sweep finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use shared_types::NoticeType;
    use std::sync::Mutex;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap()
    }

    fn record(id: &str, days_out: i64, status: NoticeStatus) -> NoticeRecord {
        let today = as_of().date_naive();
        NoticeRecord {
            id: id.to_string(),
            contract_id: "contract-1".to_string(),
            tenant_id: "tenant-1".to_string(),
            jurisdiction_id: Some("SN_DAKAR".to_string()),
            issue_date: today - Duration::days(90),
            effect_date: Some(today + Duration::days(days_out)),
            reason: None,
            notice_type: NoticeType::TenantDeparture,
            status,
            created_at: as_of(),
            updated_at: as_of(),
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        delivered: Mutex<Vec<String>>,
        fail_for: Option<String>,
    }

    impl AlertSink for RecordingSink {
        fn deliver(&self, alert: &Alert) -> anyhow::Result<()> {
            if self.fail_for.as_deref() == Some(alert.notice_id.as_str()) {
                anyhow::bail!("SMS gateway unavailable");
            }
            self.delivered.lock().unwrap().push(alert.notice_id.clone());
            Ok(())
        }
    }

    #[test]
    fn test_repository_crud() {
        let repo = InMemoryNoticeRepository::new();
        assert!(repo.is_empty());

        repo.insert(record("n1", 10, NoticeStatus::InProgress)).unwrap();
        assert!(matches!(
            repo.insert(record("n1", 10, NoticeStatus::InProgress)),
            Err(RepositoryError::Duplicate(id)) if id == "n1"
        ));

        let mut stored = repo.get("n1").unwrap();
        stored.status = NoticeStatus::Sent;
        repo.update(stored).unwrap();
        assert_eq!(repo.get("n1").unwrap().status, NoticeStatus::Sent);

        assert!(matches!(
            repo.update(record("ghost", 1, NoticeStatus::Sent)),
            Err(RepositoryError::NotFound(_))
        ));

        let removed = repo.delete("n1").unwrap();
        assert_eq!(removed.id, "n1");
        assert!(matches!(repo.get("n1"), Err(RepositoryError::NotFound(_))));
        assert!(matches!(repo.delete("n1"), Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn test_list_by_status() {
        let repo = InMemoryNoticeRepository::new();
        repo.insert(record("a", 5, NoticeStatus::InProgress)).unwrap();
        repo.insert(record("b", 5, NoticeStatus::Sent)).unwrap();
        repo.insert(record("c", 5, NoticeStatus::InProgress)).unwrap();

        let active = repo.list_by_status(NoticeStatus::InProgress).unwrap();
        let ids: Vec<_> = active.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(repo.list_by_status(NoticeStatus::Archived).unwrap().is_empty());
    }

    #[test]
    fn test_sweep_delivers_alerts() {
        let repo = InMemoryNoticeRepository::new();
        repo.insert(record("soon", 2, NoticeStatus::InProgress)).unwrap();
        repo.insert(record("later", 12, NoticeStatus::InProgress)).unwrap();
        repo.insert(record("far", 60, NoticeStatus::InProgress)).unwrap();
        repo.insert(record("sent", 1, NoticeStatus::Sent)).unwrap();

        let sink = RecordingSink::default();
        let summary = EscalationSweep::default().run(&repo, &sink, as_of()).unwrap();

        assert_eq!(summary.evaluated, 3);
        assert_eq!(summary.alerted, 2);
        assert_eq!(summary.delivered, 2);
        assert_eq!(summary.delivery_failures, 0);
        assert_eq!(summary.malformed, 0);
        assert_eq!(*sink.delivered.lock().unwrap(), vec!["soon", "later"]);
    }

    #[test]
    fn test_sweep_survives_failures() {
        let repo = InMemoryNoticeRepository::new();
        let mut broken = record("broken", 3, NoticeStatus::InProgress);
        broken.effect_date = None;
        repo.insert(broken).unwrap();
        repo.insert(record("a", 3, NoticeStatus::InProgress)).unwrap();
        repo.insert(record("b", 20, NoticeStatus::InProgress)).unwrap();

        let sink = RecordingSink {
            fail_for: Some("a".to_string()),
            ..RecordingSink::default()
        };
        let summary = EscalationSweep::default().run(&repo, &sink, as_of()).unwrap();

        assert_eq!(summary.evaluated, 3);
        assert_eq!(summary.alerted, 2);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.delivery_failures, 1);
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.report.failures[0].notice_id, "broken");
        assert_eq!(*sink.delivered.lock().unwrap(), vec!["b"]);
    }

    #[test]
    fn test_empty_repository_sweep() {
        let repo = InMemoryNoticeRepository::new();
        let sink = RecordingSink::default();
        let summary = EscalationSweep::default().run(&repo, &sink, as_of()).unwrap();
        assert_eq!(summary, SweepSummary::default());
    }
}
