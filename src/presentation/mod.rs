//! Presentation layer: HTTP controllers, DTOs and routing

pub mod controllers;
pub mod models;
pub mod routes;


pub use controllers::AppState;
pub use routes::{ApiDoc, create_router};
