//! Route definitions and server setup

use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::presentation::controllers::{
    AppState, get_report, health_check, ingest_report, list_reports, trigger_test_report,
    update_report_status,
};
use crate::presentation::models::*;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::ingest_report,
        crate::presentation::controllers::trigger_test_report,
        crate::presentation::controllers::list_reports,
        crate::presentation::controllers::get_report,
        crate::presentation::controllers::update_report_status,
        crate::presentation::controllers::health_check
    ),
    components(
        schemas(
            crate::application::IngestPayload,
            IngestResponse,
            ReportDto,
            UpdateStatusRequest,
            ErrorResponse,
            HealthResponse,
            crate::domain::report::ReportSource,
            crate::domain::report::Severity,
            crate::domain::report::ReportStatus
        )
    ),
    tags(
        (name = "webhook", description = "Authenticated security report intake"),
        (name = "reports", description = "Report listing, lookup and triage"),
        (name = "health", description = "System health monitoring")
    ),
    info(
        title = "Vigil API",
        version = "0.1.0",
        description = "Security report intake and triage API. Ingests findings from advisory feeds, TLS-expiry checks and dependency audits, and tracks them through a forward-only triage lifecycle."
    )
)]
pub struct ApiDoc;

/// Create the application router with the middleware stack
pub fn create_router(app_state: AppState, config: &Config) -> Router {
    let webhook_routes = Router::new()
        .route("/webhook/security-report", post(ingest_report))
        .route("/webhook/test", post(trigger_test_report));

    let report_routes = Router::new()
        .route("/reports", get(list_reports))
        .route("/reports/{id}", get(get_report).patch(update_report_status));

    let api_routes = webhook_routes.merge(report_routes);

    // Build CORS layer from configuration
    let cors_layer =
        if config.server.allowed_origins.len() == 1 && config.server.allowed_origins[0] == "*" {
            CorsLayer::new()
                .allow_origin(tower_http::cors::AllowOrigin::mirror_request())
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PATCH,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    axum::http::HeaderName::from_static("x-api-key"),
                ])
                .allow_credentials(false)
                .max_age(Duration::from_secs(3600))
        } else {
            let mut layer = CorsLayer::new();
            for origin in &config.server.allowed_origins {
                match axum::http::HeaderValue::from_str(origin) {
                    Ok(origin_header) => {
                        layer = layer.allow_origin(origin_header);
                    }
                    Err(_) => {
                        tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    }
                }
            }
            layer
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PATCH,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    axum::http::HeaderName::from_static("x-api-key"),
                ])
                .allow_credentials(false)
                .max_age(Duration::from_secs(3600))
        };

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check));

    // Conditionally expose Swagger UI based on configuration (avoid leaking docs in production).
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        // HTTP tracing
        .layer(TraceLayer::new_for_http())
        // CORS handling
        .layer(cors_layer)
        // Global request timeout
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )));

    router.layer(service_builder).with_state(app_state)
}
