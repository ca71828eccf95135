//! Application layer: use cases orchestrating the domain and the store

pub mod use_cases;

pub use use_cases::{
    IngestPayload, IngestReportUseCase, QueryReportsUseCase, UpdateReportStatusUseCase,
};
