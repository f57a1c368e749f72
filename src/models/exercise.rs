//! Exercise recommendation types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::diabetes::Gender;
use crate::inference::exercise::EXERCISE_FEATURES;

#[derive(Debug, Deserialize, Validate)]
pub struct ExerciseRequest {
    pub gender: Option<String>,
    #[validate(range(min = 0.0, max = 120.0))]
    pub age: Option<f32>,
    /// Height in centimeters
    #[validate(range(min = 50.0, max = 272.0))]
    pub height: Option<f32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub diabetes: Option<f32>,
    #[validate(range(min = 5.0, max = 100.0))]
    pub bmi: Option<f32>,
}

impl ExerciseRequest {
    /// Feature vector in training order, None when any field is missing
    pub fn features(&self) -> Option<[f32; EXERCISE_FEATURES]> {
        Some([
            Gender::parse(self.gender.as_deref()?).encode(),
            self.age?,
            self.height?,
            self.diabetes?,
            self.bmi?,
        ])
    }
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub calories_burned: f32,
    pub exercise_categories: Vec<String>,
    pub exercise_duration: f32,
}
