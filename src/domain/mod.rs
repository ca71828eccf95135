//! Domain layer

pub mod report;
