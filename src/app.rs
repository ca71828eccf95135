//! Application setup and wiring

use std::sync::Arc;

use axum::Router;

use crate::application::{IngestReportUseCase, QueryReportsUseCase, UpdateReportStatusUseCase};
use crate::config::Config;
use crate::infrastructure::InMemoryReportStore;
use crate::presentation::{AppState, create_router};

/// Build the application router from configuration.
pub fn create_app(config: &Config) -> Router {
    let repository = Arc::new(InMemoryReportStore::new());

    if config.webhook.api_key.as_deref().is_none_or(str::is_empty) {
        tracing::warn!(
            "No webhook key configured (VIGIL__WEBHOOK__API_KEY); all intake requests will be rejected"
        );
    }

    let state = AppState {
        ingest: Arc::new(IngestReportUseCase::new(
            repository.clone(),
            config.webhook.api_key.clone(),
        )),
        update_status: Arc::new(UpdateReportStatusUseCase::new(repository.clone())),
        query: Arc::new(QueryReportsUseCase::new(repository)),
    };

    create_router(state, config)
}
