//! Diabetes prediction handler

use axum::{extract::State, Json};
use validator::Validate;

use crate::models::{DiabetesRequest, DiabetesResponse};
use crate::{AppError, AppResult, AppState};

/// Percentage above which the response warns the patient
const RISK_NOTE_PERCENT: f32 = 18.0;

const NOTE_AT_RISK: &str = "The patient may be prone to diabetes. Please consult a doctor.";
const NOTE_NOT_AT_RISK: &str = "Patients may not be prone to diabetes.";

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<DiabetesRequest>,
) -> AppResult<Json<DiabetesResponse>> {
    let features = req
        .features()
        .ok_or_else(|| AppError::ValidationError(super::MISSING_FIELDS.to_string()))?;
    req.validate()?;

    let probability = state.predictors.diabetes.predict(features)?;
    let percentage = round2(probability * 100.0);

    let note = if percentage > RISK_NOTE_PERCENT {
        NOTE_AT_RISK
    } else {
        NOTE_NOT_AT_RISK
    };

    Ok(Json(DiabetesResponse { percentage, note }))
}

pub(crate) fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
