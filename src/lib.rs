//! Vigil - Security report intake and triage API
//!
//! Ingests third-party security findings (vulnerability advisories,
//! TLS-expiry checks, dependency-audit results) through an authenticated
//! webhook, persists them with a severity and a forward-only triage status,
//! and exposes them for filtered listing and manual triage.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── domain/           # Entities, value objects, validation, errors
//! ├── application/      # Intake, lifecycle and query use cases
//! ├── infrastructure/   # Record store implementations
//! ├── presentation/     # HTTP controllers, DTOs, routes, OpenAPI
//! └── config/           # Configuration management
//! ```
//!
//! # Configuration
//!
//! Environment variables use the `VIGIL__` prefix with double underscore
//! separators:
//!
//! ```bash
//! VIGIL__SERVER__PORT=3000
//! VIGIL__WEBHOOK__API_KEY=<shared secret>
//! ```

mod app;

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::create_app;
pub use config::Config;
pub use logging::init_tracing;
