//! In-memory record store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::report::{
    NewReport, ReportError, ReportFilter, ReportRepository, ReportStatus, SecurityReport,
};

/// Record kept alongside an insertion sequence number.
///
/// The sequence breaks ordering ties between reports created within the same
/// timestamp granularity, so listings stay newest-first and deterministic.
struct StoredReport {
    report: SecurityReport,
    seq: u64,
}

/// Keyed in-memory report store.
///
/// The write lock gives each `create`/`update_status` exclusive access, so a
/// read-modify-write on one record never interleaves with a concurrent
/// update.
pub struct InMemoryReportStore {
    records: RwLock<HashMap<Uuid, StoredReport>>,
    next_seq: RwLock<u64>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_seq: RwLock::new(0),
        }
    }
}

impl Default for InMemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportStore {
    async fn create(&self, report: NewReport) -> Result<SecurityReport, ReportError> {
        let now = Utc::now();
        let record = SecurityReport {
            id: Uuid::new_v4(),
            source: report.source,
            severity: report.severity,
            title: report.title,
            summary: report.summary,
            raw_data: report.raw_data,
            status: ReportStatus::New,
            created_at: now,
            updated_at: now,
        };

        let seq = {
            let mut next = self.next_seq.write().await;
            *next += 1;
            *next
        };

        let mut records = self.records.write().await;
        records.insert(
            record.id,
            StoredReport {
                report: record.clone(),
                seq,
            },
        );

        tracing::debug!(report_id = %record.id, source = %record.source, "Report stored");
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SecurityReport>, ReportError> {
        let records = self.records.read().await;
        Ok(records.get(&id).map(|stored| stored.report.clone()))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReportStatus,
    ) -> Result<Option<SecurityReport>, ReportError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(stored) => {
                stored.report.status = status;
                stored.report.updated_at = Utc::now();
                Ok(Some(stored.report.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &ReportFilter) -> Result<Vec<SecurityReport>, ReportError> {
        let records = self.records.read().await;
        let mut matching: Vec<&StoredReport> = records
            .values()
            .filter(|stored| {
                filter
                    .severity
                    .is_none_or(|severity| stored.report.severity == severity)
                    && filter.status.is_none_or(|status| stored.report.status == status)
            })
            .collect();

        matching.sort_by(|a, b| {
            b.report
                .created_at
                .cmp(&a.report.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(matching.into_iter().map(|stored| stored.report.clone()).collect())
    }
}
