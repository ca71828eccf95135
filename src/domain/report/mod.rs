//! Security report domain: entities, value objects, validation, errors

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod validation;
pub mod value_objects;

pub use entities::{NewReport, SecurityReport};
pub use errors::ReportError;
pub use repositories::{ReportFilter, ReportRepository};
pub use value_objects::{ReportSource, ReportStatus, Severity};
