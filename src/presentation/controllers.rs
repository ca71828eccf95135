//! HTTP controllers for intake, triage and listing

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use uuid::Uuid;

use crate::application::{IngestReportUseCase, QueryReportsUseCase, UpdateReportStatusUseCase};
use crate::domain::report::ReportError;
use crate::presentation::models::{
    ErrorResponse, HealthResponse, IngestResponse, ListReportsQuery, ReportDto,
    UpdateStatusRequest,
};

/// Header carrying the webhook shared secret
pub const WEBHOOK_KEY_HEADER: &str = "x-api-key";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestReportUseCase>,
    pub update_status: Arc<UpdateReportStatusUseCase>,
    pub query: Arc<QueryReportsUseCase>,
}

/// Convert a ReportError to an HTTP response
fn report_error_to_response(error: ReportError) -> Response {
    let status = match &error {
        ReportError::Unauthorized => StatusCode::UNAUTHORIZED,
        ReportError::MalformedPayload
        | ReportError::MissingFields
        | ReportError::InvalidSource
        | ReportError::InvalidSeverity
        | ReportError::InvalidStatus => StatusCode::BAD_REQUEST,
        ReportError::NotFound(_) => StatusCode::NOT_FOUND,
        ReportError::InvalidTransition { .. } => StatusCode::CONFLICT,
        ReportError::KeyNotConfigured | ReportError::Storage { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        tracing::error!(error = %error, status = %status, "Request failed");
    } else {
        tracing::debug!(error = %error, status = %status, "Request rejected");
    }

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// POST /api/v1/webhook/security-report - Authenticated report intake
#[utoipa::path(
    post,
    path = "/api/v1/webhook/security-report",
    request_body = crate::application::IngestPayload,
    responses(
        (status = 201, description = "Report created", body = IngestResponse),
        (status = 400, description = "Malformed body, missing fields or invalid enum value", body = ErrorResponse),
        (status = 401, description = "Missing or mismatched webhook key", body = ErrorResponse)
    ),
    tag = "webhook",
    security(("webhook_key" = []))
)]
pub async fn ingest_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let presented_key = headers
        .get(WEBHOOK_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match state.ingest.execute(presented_key, &body).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(IngestResponse { success: true, id }),
        )
            .into_response(),
        Err(error) => report_error_to_response(error),
    }
}

/// POST /api/v1/webhook/test - Feed a payload through the intake path
/// using the server's own configured key
#[utoipa::path(
    post,
    path = "/api/v1/webhook/test",
    request_body = crate::application::IngestPayload,
    responses(
        (status = 201, description = "Report created", body = IngestResponse),
        (status = 400, description = "Malformed body, missing fields or invalid enum value", body = ErrorResponse),
        (status = 500, description = "Webhook key is not configured", body = ErrorResponse)
    ),
    tag = "webhook"
)]
pub async fn trigger_test_report(State(state): State<AppState>, body: Bytes) -> Response {
    match state.ingest.execute_self_test(&body).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(IngestResponse { success: true, id }),
        )
            .into_response(),
        Err(error) => report_error_to_response(error),
    }
}

/// GET /api/v1/reports - List reports, newest first
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Matching reports ordered by creation time descending", body = [ReportDto])
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ListReportsQuery>,
) -> Response {
    match state
        .query
        .list(params.severity.as_deref(), params.status.as_deref())
        .await
    {
        Ok(reports) => Json(
            reports
                .into_iter()
                .map(ReportDto::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(error) => report_error_to_response(error),
    }
}

/// GET /api/v1/reports/{id} - Retrieve one report
#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report found", body = ReportDto),
        (status = 404, description = "Unknown report ID", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn get_report(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.query.get_by_id(id).await {
        Ok(report) => Json(ReportDto::from(report)).into_response(),
        Err(error) => report_error_to_response(error),
    }
}

/// PATCH /api/v1/reports/{id} - Move a report forward through triage
#[utoipa::path(
    patch,
    path = "/api/v1/reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated report", body = ReportDto),
        (status = 400, description = "Missing or invalid status value", body = ErrorResponse),
        (status = 404, description = "Unknown report ID", body = ErrorResponse),
        (status = 409, description = "Transition is not the direct successor of the current status", body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn update_report_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Response {
    // Parsed by hand so a malformed body yields the same error shape as the
    // webhook intake path.
    let request: UpdateStatusRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => return report_error_to_response(ReportError::MalformedPayload),
    };

    match state
        .update_status
        .execute(id, request.status.as_deref())
        .await
    {
        Ok(report) => Json(ReportDto::from(report)).into_response(),
        Err(error) => report_error_to_response(error),
    }
}

/// GET /health - Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
