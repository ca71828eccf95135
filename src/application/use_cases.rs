//! Report intake, lifecycle and query use cases

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::report::{
    NewReport, ReportError, ReportFilter, ReportRepository, ReportStatus, SecurityReport, Severity,
    validation,
};

/// Candidate field set of an intake payload, before validation.
///
/// Every field is optional at this stage so the validator can report the
/// required-field list as a whole instead of failing on deserialization.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct IngestPayload {
    pub source: Option<String>,
    pub severity: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "rawData")]
    #[schema(value_type = Option<Object>)]
    pub raw_data: Option<serde_json::Value>,
}

/// Authenticated webhook intake.
///
/// The shared secret is injected at construction and read-only afterwards;
/// authorization runs before the body is even parsed.
pub struct IngestReportUseCase {
    repository: Arc<dyn ReportRepository>,
    webhook_key: Option<String>,
}

impl IngestReportUseCase {
    pub fn new(repository: Arc<dyn ReportRepository>, webhook_key: Option<String>) -> Self {
        Self {
            repository,
            webhook_key,
        }
    }

    /// Ingest a webhook payload presented with the caller's credential.
    pub async fn execute(
        &self,
        presented_key: Option<&str>,
        body: &[u8],
    ) -> Result<Uuid, ReportError> {
        self.authorize(presented_key)?;
        self.ingest(body).await
    }

    /// Ingest a payload on behalf of the test-trigger endpoint, which runs
    /// inside the trust boundary and uses the server's own configured key.
    pub async fn execute_self_test(&self, body: &[u8]) -> Result<Uuid, ReportError> {
        if !self.key_configured() {
            return Err(ReportError::KeyNotConfigured);
        }
        self.ingest(body).await
    }

    fn key_configured(&self) -> bool {
        self.webhook_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    fn authorize(&self, presented: Option<&str>) -> Result<(), ReportError> {
        match self.webhook_key.as_deref() {
            Some(expected) if !expected.is_empty() && presented == Some(expected) => Ok(()),
            _ => Err(ReportError::Unauthorized),
        }
    }

    async fn ingest(&self, body: &[u8]) -> Result<Uuid, ReportError> {
        let payload: IngestPayload =
            serde_json::from_slice(body).map_err(|_| ReportError::MalformedPayload)?;

        let (source, severity) = validation::validate_intake(
            payload.source.as_deref(),
            payload.severity.as_deref(),
            payload.title.as_deref(),
            payload.summary.as_deref(),
        )?;

        let raw_data = match payload.raw_data {
            Some(value) => serde_json::to_string(&value).map_err(|e| ReportError::Storage {
                message: e.to_string(),
            })?,
            None => "{}".to_string(),
        };

        let report = self
            .repository
            .create(NewReport {
                source,
                severity,
                // Presence was validated above.
                title: payload.title.unwrap_or_default(),
                summary: payload.summary.unwrap_or_default(),
                raw_data,
            })
            .await?;

        tracing::info!(
            report_id = %report.id,
            source = %report.source,
            severity = %report.severity,
            "Security report ingested"
        );
        Ok(report.id)
    }
}

/// Status state machine enforcement for triage updates.
pub struct UpdateReportStatusUseCase {
    repository: Arc<dyn ReportRepository>,
}

impl UpdateReportStatusUseCase {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    /// Move a report to `requested`. The value is validated before any
    /// lookup; the transition must be the direct successor of the current
    /// status.
    pub async fn execute(
        &self,
        id: Uuid,
        requested: Option<&str>,
    ) -> Result<SecurityReport, ReportError> {
        let target = validation::validate_status(requested)?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ReportError::NotFound(id))?;

        if !current.status.can_transition_to(&target) {
            return Err(ReportError::InvalidTransition {
                from: current.status,
                to: target,
            });
        }

        let updated = self
            .repository
            .update_status(id, target)
            .await?
            .ok_or(ReportError::NotFound(id))?;

        tracing::info!(
            report_id = %id,
            from = %current.status,
            to = %target,
            "Report status updated"
        );
        Ok(updated)
    }
}

/// Filtered report listing and single-record lookup.
pub struct QueryReportsUseCase {
    repository: Arc<dyn ReportRepository>,
}

impl QueryReportsUseCase {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    /// List reports, newest first, restricted by optional exact-match
    /// filters. A filter value outside its closed domain can match no stored
    /// record, so the listing short-circuits to an empty result.
    pub async fn list(
        &self,
        severity: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<SecurityReport>, ReportError> {
        let mut filter = ReportFilter::default();

        match severity.filter(|v| !v.is_empty()) {
            None => {}
            Some(v) => match Severity::from_str(v) {
                Ok(parsed) => filter.severity = Some(parsed),
                Err(_) => return Ok(Vec::new()),
            },
        }

        match status.filter(|v| !v.is_empty()) {
            None => {}
            Some(v) => match ReportStatus::from_str(v) {
                Ok(parsed) => filter.status = Some(parsed),
                Err(_) => return Ok(Vec::new()),
            },
        }

        self.repository.list(&filter).await
    }

    /// Fetch one report by identifier.
    pub async fn get_by_id(&self, id: Uuid) -> Result<SecurityReport, ReportError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ReportError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryReportStore;

    fn store() -> Arc<InMemoryReportStore> {
        Arc::new(InMemoryReportStore::new())
    }

    fn ingest_with_key(repository: Arc<InMemoryReportStore>) -> IngestReportUseCase {
        IngestReportUseCase::new(repository, Some("secret".to_string()))
    }

    fn valid_body() -> Vec<u8> {
        serde_json::json!({
            "source": "npm-audit",
            "severity": "high",
            "title": "X",
            "summary": "Y",
        })
        .to_string()
        .into_bytes()
    }

    #[tokio::test]
    async fn ingest_creates_a_new_report() {
        let repository = store();
        let ingest = ingest_with_key(repository.clone());

        let id = ingest.execute(Some("secret"), &valid_body()).await.unwrap();

        let stored = repository.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReportStatus::New);
        assert_eq!(stored.title, "X");
        assert_eq!(stored.raw_data, "{}");
    }

    #[tokio::test]
    async fn ingest_preserves_raw_data_encoding() {
        let repository = store();
        let ingest = ingest_with_key(repository.clone());
        let body = serde_json::json!({
            "source": "github-advisory",
            "severity": "critical",
            "title": "X",
            "summary": "Y",
            "rawData": {"cve": "CVE-2024-0001", "refs": [1, 2]},
        })
        .to_string();

        let id = ingest.execute(Some("secret"), body.as_bytes()).await.unwrap();

        let stored = repository.find_by_id(id).await.unwrap().unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&stored.raw_data).unwrap();
        assert_eq!(decoded["cve"], "CVE-2024-0001");
        assert_eq!(decoded["refs"], serde_json::json!([1, 2]));
    }

    #[tokio::test]
    async fn ingest_rejects_bad_or_missing_credential_before_parsing() {
        let repository = store();
        let ingest = ingest_with_key(repository.clone());

        assert_eq!(
            ingest.execute(Some("wrong"), &valid_body()).await,
            Err(ReportError::Unauthorized)
        );
        assert_eq!(
            ingest.execute(None, &valid_body()).await,
            Err(ReportError::Unauthorized)
        );
        // Garbage body with a bad key: the credential check wins.
        assert_eq!(
            ingest.execute(Some("wrong"), b"not json").await,
            Err(ReportError::Unauthorized)
        );
        assert!(repository.list(&ReportFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ingest_fails_when_no_key_is_configured() {
        let ingest = IngestReportUseCase::new(store(), None);
        assert_eq!(
            ingest.execute(Some("anything"), &valid_body()).await,
            Err(ReportError::Unauthorized)
        );

        let ingest = IngestReportUseCase::new(store(), Some(String::new()));
        assert_eq!(
            ingest.execute(Some(""), &valid_body()).await,
            Err(ReportError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn ingest_validation_failures_create_no_record() {
        let repository = store();
        let ingest = ingest_with_key(repository.clone());

        assert_eq!(
            ingest.execute(Some("secret"), b"{not json").await,
            Err(ReportError::MalformedPayload)
        );
        assert_eq!(
            ingest
                .execute(Some("secret"), br#"{"source": "npm-audit"}"#)
                .await,
            Err(ReportError::MissingFields)
        );
        assert_eq!(
            ingest
                .execute(
                    Some("secret"),
                    br#"{"source": "jenkins", "severity": "high", "title": "X", "summary": "Y"}"#
                )
                .await,
            Err(ReportError::InvalidSource)
        );
        assert_eq!(
            ingest
                .execute(
                    Some("secret"),
                    br#"{"source": "npm-audit", "severity": "medium", "title": "X", "summary": "Y"}"#
                )
                .await,
            Err(ReportError::InvalidSeverity)
        );
        assert!(repository.list(&ReportFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn self_test_requires_a_configured_key() {
        let repository = store();
        let unconfigured = IngestReportUseCase::new(repository.clone(), None);
        assert_eq!(
            unconfigured.execute_self_test(&valid_body()).await,
            Err(ReportError::KeyNotConfigured)
        );

        let configured = ingest_with_key(repository.clone());
        let id = configured.execute_self_test(&valid_body()).await.unwrap();
        assert!(repository.find_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_status_walks_the_state_machine_forward() {
        let repository = store();
        let ingest = ingest_with_key(repository.clone());
        let update = UpdateReportStatusUseCase::new(repository.clone());

        let id = ingest.execute(Some("secret"), &valid_body()).await.unwrap();

        let reviewed = update.execute(id, Some("reviewed")).await.unwrap();
        assert_eq!(reviewed.status, ReportStatus::Reviewed);
        assert!(reviewed.updated_at >= reviewed.created_at);

        let resolved = update.execute(id, Some("resolved")).await.unwrap();
        assert_eq!(resolved.status, ReportStatus::Resolved);
    }

    #[tokio::test]
    async fn update_status_rejects_out_of_domain_values_before_lookup() {
        let repository = store();
        let update = UpdateReportStatusUseCase::new(repository.clone());

        // Unknown id, invalid status: validation fires first.
        assert_eq!(
            update.execute(Uuid::new_v4(), Some("bogus")).await,
            Err(ReportError::InvalidStatus)
        );
        assert_eq!(
            update.execute(Uuid::new_v4(), None).await,
            Err(ReportError::InvalidStatus)
        );
    }

    #[tokio::test]
    async fn update_status_leaves_the_record_unchanged_on_failure() {
        let repository = store();
        let ingest = ingest_with_key(repository.clone());
        let update = UpdateReportStatusUseCase::new(repository.clone());

        let id = ingest.execute(Some("secret"), &valid_body()).await.unwrap();
        let before = repository.find_by_id(id).await.unwrap().unwrap();

        assert_eq!(
            update.execute(id, Some("bogus")).await,
            Err(ReportError::InvalidStatus)
        );
        let after = repository.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(after.status, before.status);
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn update_status_rejects_skips_and_reversals() {
        let repository = store();
        let ingest = ingest_with_key(repository.clone());
        let update = UpdateReportStatusUseCase::new(repository.clone());

        let id = ingest.execute(Some("secret"), &valid_body()).await.unwrap();

        assert_eq!(
            update.execute(id, Some("resolved")).await,
            Err(ReportError::InvalidTransition {
                from: ReportStatus::New,
                to: ReportStatus::Resolved,
            })
        );

        update.execute(id, Some("reviewed")).await.unwrap();
        assert_eq!(
            update.execute(id, Some("new")).await,
            Err(ReportError::InvalidTransition {
                from: ReportStatus::Reviewed,
                to: ReportStatus::New,
            })
        );
    }

    #[tokio::test]
    async fn update_status_on_unknown_id_is_not_found() {
        let update = UpdateReportStatusUseCase::new(store());
        let id = Uuid::new_v4();
        assert_eq!(
            update.execute(id, Some("reviewed")).await,
            Err(ReportError::NotFound(id))
        );
    }

    #[tokio::test]
    async fn list_applies_filters_and_ignores_unparseable_values() {
        let repository = store();
        let ingest = ingest_with_key(repository.clone());
        let query = QueryReportsUseCase::new(repository.clone());

        for severity in ["critical", "low", "critical"] {
            let body = serde_json::json!({
                "source": "ssl-check",
                "severity": severity,
                "title": "X",
                "summary": "Y",
            })
            .to_string();
            ingest.execute(Some("secret"), body.as_bytes()).await.unwrap();
        }

        assert_eq!(query.list(None, None).await.unwrap().len(), 3);
        assert_eq!(query.list(Some("critical"), None).await.unwrap().len(), 2);
        assert_eq!(query.list(None, Some("new")).await.unwrap().len(), 3);
        assert_eq!(query.list(None, Some("resolved")).await.unwrap().len(), 0);
        // Out-of-domain filter values can match nothing.
        assert!(query.list(Some("bogus"), None).await.unwrap().is_empty());
        // Empty values impose no restriction.
        assert_eq!(query.list(Some(""), Some("")).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn get_by_id_surfaces_not_found() {
        let query = QueryReportsUseCase::new(store());
        let id = Uuid::new_v4();
        assert_eq!(query.get_by_id(id).await, Err(ReportError::NotFound(id)));
    }
}
