//! API request and response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::report::{ReportSource, ReportStatus, SecurityReport, Severity};

/// Full report representation returned by the API.
///
/// `rawData` carries the original webhook payload string-encoded; consumers
/// must treat a failed decode as display-the-raw-string, not as an error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "npm-audit")]
    pub source: ReportSource,

    #[schema(example = "high")]
    pub severity: Severity,

    #[schema(example = "Prototype pollution in lodash")]
    pub title: String,

    #[schema(example = "lodash < 4.17.21 is vulnerable to prototype pollution")]
    pub summary: String,

    /// String-encoded JSON payload as submitted by the source system
    #[schema(example = r#"{"cve": "CVE-2024-0001"}"#)]
    pub raw_data: String,

    #[schema(example = "new")]
    pub status: ReportStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SecurityReport> for ReportDto {
    fn from(report: SecurityReport) -> Self {
        Self {
            id: report.id,
            source: report.source,
            severity: report.severity,
            title: report.title,
            summary: report.summary,
            raw_data: report.raw_data,
            status: report.status,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

/// Response for an accepted webhook intake
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngestResponse {
    #[schema(example = true)]
    pub success: bool,

    /// Identifier of the newly created report
    pub id: Uuid,
}

/// Request model for a triage status update
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status. Must be the direct successor of the current status
    /// along new -> reviewed -> resolved.
    #[schema(example = "reviewed")]
    pub status: Option<String>,
}

/// Optional exact-match filters for report listings.
///
/// Unrecognized query keys are ignored.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    /// Restrict to an exact severity value
    pub severity: Option<String>,
    /// Restrict to an exact status value
    pub status: Option<String>,
}

/// Error payload returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "Invalid severity. Must be one of: critical, high, moderate, low, info")]
    pub error: String,
}

/// Liveness response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,

    #[schema(example = "0.1.0")]
    pub version: String,

    pub timestamp: DateTime<Utc>,
}
