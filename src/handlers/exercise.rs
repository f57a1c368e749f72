//! Exercise recommendation handler

use axum::{extract::State, Json};
use validator::Validate;

use super::diabetes::round2;
use crate::models::{ExerciseRequest, ExerciseResponse};
use crate::{AppError, AppResult, AppState};

pub async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<ExerciseRequest>,
) -> AppResult<Json<ExerciseResponse>> {
    let features = req
        .features()
        .ok_or_else(|| AppError::ValidationError(super::MISSING_FIELDS.to_string()))?;
    req.validate()?;

    let plan = state.predictors.exercise.plan(features)?;

    Ok(Json(ExerciseResponse {
        calories_burned: plan.calories_burned,
        exercise_categories: plan.categories,
        exercise_duration: round2(plan.duration_minutes),
    }))
}
