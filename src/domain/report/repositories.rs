//! Report repository trait

use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{NewReport, SecurityReport};
use super::errors::ReportError;
use super::value_objects::{ReportStatus, Severity};

/// Equality filters for report listings.
///
/// `None` imposes no restriction on that attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFilter {
    pub severity: Option<Severity>,
    pub status: Option<ReportStatus>,
}

/// Narrow CRUD interface over the record store.
///
/// The store is responsible for identifier generation, timestamp stamping on
/// create and update, and per-record atomicity of `update_status`.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persist a validated report with `status = new`; returns the stored
    /// record including the generated id and timestamps.
    async fn create(&self, report: NewReport) -> Result<SecurityReport, ReportError>;

    /// Find a report by its identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SecurityReport>, ReportError>;

    /// Replace the status of an existing report and refresh `updated_at`.
    /// Returns `None` when the identifier is unknown.
    async fn update_status(
        &self,
        id: Uuid,
        status: ReportStatus,
    ) -> Result<Option<SecurityReport>, ReportError>;

    /// All reports matching the filter, ordered by creation time descending.
    async fn list(&self, filter: &ReportFilter) -> Result<Vec<SecurityReport>, ReportError>;
}
