//! Report domain errors

use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ReportStatus;

/// Everything that can go wrong between the webhook boundary and the store.
///
/// Validation and authorization failures are detected before any store
/// mutation; messages are written for the external caller and enumerate the
/// valid domain values where that helps the caller self-correct.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid JSON")]
    MalformedPayload,

    #[error("Missing required fields: source, severity, title, summary")]
    MissingFields,

    #[error("Invalid source. Must be one of: github-advisory, ssl-check, npm-audit")]
    InvalidSource,

    #[error("Invalid severity. Must be one of: critical, high, moderate, low, info")]
    InvalidSeverity,

    #[error("Invalid status. Must be one of: new, reviewed, resolved")]
    InvalidStatus,

    #[error("Report not found: {0}")]
    NotFound(Uuid),

    #[error("Illegal status transition: {from} -> {to}")]
    InvalidTransition {
        from: ReportStatus,
        to: ReportStatus,
    },

    #[error("Webhook key is not configured")]
    KeyNotConfigured,

    #[error("Storage error: {message}")]
    Storage { message: String },
}
