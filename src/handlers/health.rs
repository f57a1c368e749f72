//! Index and health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

pub async fn index() -> &'static str {
    "mau ngapain hayo"
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    catalog_foods: usize,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        catalog_foods: state.catalog.foods().len(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
