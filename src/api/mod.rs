//! Local HTTP surface
//!
//! Serves the item routes over plain HTTP by turning each request into the
//! same event the serverless runtime would deliver.

mod routes;
mod handlers;

pub use routes::{create_router, AppState};
pub use handlers::HealthResponse;
