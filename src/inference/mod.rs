//! ONNX-backed predictors
//!
//! Each predictor owns its session(s) plus the JSON sidecars exported with
//! the model (feature scaler, label table). Sessions are optional: when an
//! artifact is missing the predictor answers from a documented heuristic
//! instead, so the server still boots on a bare checkout.

pub mod diabetes;
pub mod exercise;
pub mod labels;
pub mod scaler;
pub mod vision;


use std::path::Path;

use ndarray::{Array, Dimension};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use thiserror::Error;

pub use diabetes::DiabetesModel;
pub use exercise::{ExercisePlan, ExercisePlanner};
pub use vision::FoodClassifier;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("model not loaded")]
    NotLoaded,
    #[error("{0}")]
    Session(String),
    #[error("{0}")]
    BadInput(String),
}

/// Every predictor the server exposes, loaded together at startup
pub struct PredictorSet {
    pub diabetes: DiabetesModel,
    pub exercise: ExercisePlanner,
    pub food: FoodClassifier,
}

impl PredictorSet {
    pub fn load(model_dir: &Path) -> Self {
        let set = Self {
            diabetes: DiabetesModel::load(&model_dir.join("diabetes")),
            exercise: ExercisePlanner::load(&model_dir.join("exercise")),
            food: FoodClassifier::load(&model_dir.join("food_classification")),
        };

        tracing::info!(
            diabetes = set.diabetes.is_loaded(),
            exercise = set.exercise.is_loaded(),
            food_scan = set.food.is_loaded(),
            "Predictors initialized"
        );
        set
    }
}

/// Open an ONNX session, or None when the file is absent or unreadable
pub(crate) fn load_session(path: &Path) -> Option<Mutex<Session>> {
    if !path.exists() {
        tracing::warn!("Model not found, fallback mode: {}", path.display());
        return None;
    }

    let built = Session::builder()
        .and_then(|b| Ok(b.with_optimization_level(GraphOptimizationLevel::Level3)?))
        .and_then(|mut b| b.commit_from_file(path));

    match built {
        Ok(session) => {
            tracing::info!("Loaded model: {}", path.display());
            Some(Mutex::new(session))
        }
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", path.display(), e);
            None
        }
    }
}

/// Run a session on one input tensor and flatten the first output
pub(crate) fn run_to_vec<D: Dimension + 'static>(
    session: &mut Session,
    input: Array<f32, D>,
) -> Result<Vec<f32>, PredictError> {
    let output_name = session
        .outputs()
        .first()
        .map(|o| o.name().to_string())
        .ok_or_else(|| PredictError::Session("model defines no output".to_string()))?;

    let input_tensor = Value::from_array(input)
        .map_err(|e| PredictError::Session(format!("Tensor error: {}", e)))?;

    let outputs = session
        .run(ort::inputs![input_tensor])
        .map_err(|e| PredictError::Session(format!("Inference failed: {}", e)))?;

    let output = outputs
        .get(&output_name)
        .ok_or_else(|| PredictError::Session("No output".to_string()))?;

    let output_tensor = output
        .try_extract_tensor::<f32>()
        .map_err(|e| PredictError::Session(format!("Extract error: {}", e)))?;

    Ok(output_tensor.1.to_vec())
}

pub(crate) fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}
