//! Food scan handler

use axum::{extract::State, Json};

use crate::models::{ScanRequest, ScanResponse};
use crate::{AppError, AppResult, AppState};

pub async fn detect(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> AppResult<Json<ScanResponse>> {
    let url = req
        .image
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::ValidationError("The 'image' field must be provided".to_string()))?;

    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(AppError::ExternalServiceError(format!(
            "image fetch returned {}",
            response.status()
        )));
    }
    let bytes = response.bytes().await?;

    let objects = state.predictors.food.classify(&bytes)?;

    Ok(Json(ScanResponse { objects }))
}
