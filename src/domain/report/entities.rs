//! Report domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{ReportSource, ReportStatus, Severity};

/// One ingested security finding.
///
/// `id`, `created_at` and `updated_at` are stamped by the record store;
/// `status` starts at [`ReportStatus::New`] and only ever moves forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityReport {
    pub id: Uuid,
    pub source: ReportSource,
    pub severity: Severity,
    pub title: String,
    pub summary: String,
    /// Original webhook payload as string-encoded JSON; `"{}"` when the
    /// caller omitted it. Best-effort decode on read, never assumed valid.
    pub raw_data: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated report that has not been persisted yet.
///
/// Produced by intake validation; the store turns it into a
/// [`SecurityReport`] by generating the identifier and timestamps.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub source: ReportSource,
    pub severity: Severity,
    pub title: String,
    pub summary: String,
    pub raw_data: String,
}
