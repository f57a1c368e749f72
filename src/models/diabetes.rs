//! Diabetes prediction types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::inference::diabetes::DIABETES_FEATURES;

/// Patient gender, encoded the way the models were trained: male = 1,
/// anything else = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Other,
}

impl Gender {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Other
        }
    }

    pub fn encode(self) -> f32 {
        match self {
            Gender::Male => 1.0,
            Gender::Other => 0.0,
        }
    }
}

/// Smoking history encoding; unknown values map to 0 (never).
pub fn encode_smoking_history(raw: &str) -> f32 {
    match raw.trim().to_lowercase().as_str() {
        "never" => 0.0,
        "current" => 1.0,
        "former" => 2.0,
        "ever" => 3.0,
        _ => 0.0,
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct DiabetesRequest {
    pub gender: Option<String>,
    #[validate(range(min = 0.0, max = 120.0))]
    pub age: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub heart_disease: Option<f32>,
    pub smoking_history: Option<String>,
    #[validate(range(min = 5.0, max = 100.0))]
    pub bmi: Option<f32>,
}

impl DiabetesRequest {
    /// Feature vector in training order, None when any field is missing
    pub fn features(&self) -> Option<[f32; DIABETES_FEATURES]> {
        Some([
            Gender::parse(self.gender.as_deref()?).encode(),
            self.age?,
            self.heart_disease?,
            encode_smoking_history(self.smoking_history.as_deref()?),
            self.bmi?,
        ])
    }
}

#[derive(Debug, Serialize)]
pub struct DiabetesResponse {
    pub percentage: f32,
    pub note: &'static str,
}
