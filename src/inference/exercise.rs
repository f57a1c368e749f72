//! Exercise recommendation models
//!
//! A regressor predicts `[calories_burned, duration_minutes]` and a
//! classifier picks an exercise-category label, both over
//! `[gender, age, height, diabetes, bmi]` with a shared scaler. Category
//! labels are stored as comma-separated lists ("Walking or jogging,
//! Swimming.") and tidied before they reach the response.

use std::path::Path;

use ndarray::Array2;
use ort::session::Session;
use parking_lot::Mutex;

use super::labels::LabelTable;
use super::scaler::FeatureScaler;
use super::{argmax, load_session, run_to_vec, PredictError};

pub const EXERCISE_FEATURES: usize = 5;

#[derive(Debug, Clone)]
pub struct ExercisePlan {
    pub calories_burned: f32,
    pub duration_minutes: f32,
    pub categories: Vec<String>,
}

pub struct ExercisePlanner {
    regressor: Option<Mutex<Session>>,
    classifier: Option<Mutex<Session>>,
    scaler: FeatureScaler,
    labels: LabelTable,
}

impl ExercisePlanner {
    pub fn load(dir: &Path) -> Self {
        Self {
            regressor: load_session(&dir.join("regressor.onnx")),
            classifier: load_session(&dir.join("classifier.onnx")),
            scaler: FeatureScaler::load_or_identity(&dir.join("scaler.json")),
            labels: LabelTable::load_or_empty(&dir.join("labels.json")),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.regressor.is_some() && self.classifier.is_some() && !self.labels.is_empty()
    }

    pub fn plan(&self, features: [f32; EXERCISE_FEATURES]) -> Result<ExercisePlan, PredictError> {
        if !self.is_loaded() {
            return Ok(Self::plan_fallback(&features));
        }

        match self.plan_onnx(&features) {
            Ok(plan) => Ok(plan),
            Err(e) => {
                tracing::debug!("Exercise models failed ({}), using fallback", e);
                Ok(Self::plan_fallback(&features))
            }
        }
    }

    fn plan_onnx(&self, features: &[f32; EXERCISE_FEATURES]) -> Result<ExercisePlan, PredictError> {
        let regressor = self.regressor.as_ref().ok_or(PredictError::NotLoaded)?;
        let classifier = self.classifier.as_ref().ok_or(PredictError::NotLoaded)?;

        let scaled = self.scaler.transform(features);

        let regression = run_to_vec(&mut regressor.lock(), feature_row(scaled.clone())?)?;
        let calories_burned = regression
            .first()
            .copied()
            .ok_or_else(|| PredictError::Session("regressor output too short".to_string()))?;
        let duration_minutes = regression
            .get(1)
            .copied()
            .ok_or_else(|| PredictError::Session("regressor output too short".to_string()))?;

        let scores = run_to_vec(&mut classifier.lock(), feature_row(scaled)?)?;
        // A single value is a class id, a vector is per-class scores.
        let class_id = if scores.len() == 1 {
            scores[0].round().max(0.0) as usize
        } else {
            argmax(&scores).ok_or_else(|| PredictError::Session("empty classifier output".to_string()))?
        };

        let label = self
            .labels
            .decode(class_id)
            .ok_or_else(|| PredictError::Session(format!("unknown class id {}", class_id)))?;

        Ok(ExercisePlan {
            calories_burned,
            duration_minutes,
            categories: tidy_categories(label),
        })
    }

    /// Banded heuristic over the raw features
    fn plan_fallback(features: &[f32; EXERCISE_FEATURES]) -> ExercisePlan {
        let [_, age, _, diabetes, bmi] = *features;

        let calories_burned =
            (320.0 - (age - 30.0).max(0.0) * 1.8 + (bmi - 25.0) * 4.0).clamp(120.0, 600.0);
        let duration_minutes = (45.0 - (age - 30.0).max(0.0) * 0.3).clamp(15.0, 60.0);

        let categories: &[&str] = if bmi >= 30.0 {
            &["Walking", "Swimming", "Cycling"]
        } else if diabetes > 0.0 {
            &["Walking", "Light aerobics"]
        } else if age >= 55.0 {
            &["Walking", "Yoga"]
        } else {
            &["Jogging", "Strength training"]
        };

        ExercisePlan {
            calories_burned,
            duration_minutes,
            categories: categories.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn feature_row(scaled: Vec<f32>) -> Result<Array2<f32>, PredictError> {
    Array2::from_shape_vec((1, EXERCISE_FEATURES), scaled)
        .map_err(|e| PredictError::Session(format!("Array error: {}", e)))
}

/// Split a stored category label into presentable names: break on commas,
/// drop the filler word "or", trim, strip trailing periods, capitalize.
pub fn tidy_categories(label: &str) -> Vec<String> {
    label
        .split(',')
        .map(|part| {
            let words: Vec<&str> = part
                .split_whitespace()
                .filter(|w| !w.eq_ignore_ascii_case("or"))
                .collect();
            capitalize(words.join(" ").trim_end_matches('.'))
        })
        .filter(|c| !c.is_empty())
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
