//! Pure intake and status validation
//!
//! Checks run in a fixed order and return on the first failure: the whole
//! required-field list is reported as one violation, then the source domain,
//! then the severity domain. No aggregation of multiple errors.

use std::str::FromStr;

use super::errors::ReportError;
use super::value_objects::{ReportSource, ReportStatus, Severity};

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Validate the candidate field set of an intake payload.
///
/// Returns the parsed enumerations; `title` and `summary` are only checked
/// for presence and stay with the caller.
pub fn validate_intake(
    source: Option<&str>,
    severity: Option<&str>,
    title: Option<&str>,
    summary: Option<&str>,
) -> Result<(ReportSource, Severity), ReportError> {
    if !present(source) || !present(severity) || !present(title) || !present(summary) {
        return Err(ReportError::MissingFields);
    }

    // Presence was checked above; unwraps cannot be reached on None.
    let source =
        ReportSource::from_str(source.unwrap_or_default()).map_err(|_| ReportError::InvalidSource)?;
    let severity =
        Severity::from_str(severity.unwrap_or_default()).map_err(|_| ReportError::InvalidSeverity)?;

    Ok((source, severity))
}

/// Validate a requested triage status.
pub fn validate_status(candidate: Option<&str>) -> Result<ReportStatus, ReportError> {
    candidate
        .filter(|v| !v.is_empty())
        .and_then(|v| ReportStatus::from_str(v).ok())
        .ok_or(ReportError::InvalidStatus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_intake_parses_both_enums() {
        let (source, severity) =
            validate_intake(Some("npm-audit"), Some("high"), Some("X"), Some("Y")).unwrap();
        assert_eq!(source, ReportSource::NpmAudit);
        assert_eq!(severity, Severity::High);
    }

    #[test]
    fn missing_fields_are_reported_as_one_violation() {
        for (source, severity, title, summary) in [
            (None, Some("high"), Some("X"), Some("Y")),
            (Some("npm-audit"), None, Some("X"), Some("Y")),
            (Some("npm-audit"), Some("high"), None, Some("Y")),
            (Some("npm-audit"), Some("high"), Some("X"), None),
            (Some(""), Some("high"), Some("X"), Some("Y")),
            (Some("npm-audit"), Some("high"), Some(""), Some("Y")),
        ] {
            assert_eq!(
                validate_intake(source, severity, title, summary),
                Err(ReportError::MissingFields)
            );
        }
    }

    #[test]
    fn missing_field_check_runs_before_domain_checks() {
        // Invalid source AND missing summary: the missing-field violation wins.
        assert_eq!(
            validate_intake(Some("bogus"), Some("high"), Some("X"), None),
            Err(ReportError::MissingFields)
        );
    }

    #[test]
    fn source_domain_is_checked_before_severity_domain() {
        assert_eq!(
            validate_intake(Some("bogus"), Some("also-bogus"), Some("X"), Some("Y")),
            Err(ReportError::InvalidSource)
        );
        assert_eq!(
            validate_intake(Some("ssl-check"), Some("also-bogus"), Some("X"), Some("Y")),
            Err(ReportError::InvalidSeverity)
        );
    }

    #[test]
    fn status_validation_rejects_absent_and_out_of_domain_values() {
        assert_eq!(validate_status(Some("reviewed")), Ok(ReportStatus::Reviewed));
        assert_eq!(validate_status(None), Err(ReportError::InvalidStatus));
        assert_eq!(validate_status(Some("")), Err(ReportError::InvalidStatus));
        assert_eq!(validate_status(Some("bogus")), Err(ReportError::InvalidStatus));
        assert_eq!(validate_status(Some("Resolved")), Err(ReportError::InvalidStatus));
    }
}
