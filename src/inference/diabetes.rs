//! Diabetes risk model
//!
//! Binary classifier over `[gender, age, heart_disease, smoking_history,
//! bmi]`, producing a probability. Falls back to an additive risk heuristic
//! when the ONNX artifact is absent.

use std::path::Path;

use ndarray::Array2;
use ort::session::Session;
use parking_lot::Mutex;

use super::scaler::FeatureScaler;
use super::{load_session, run_to_vec, PredictError};

pub const DIABETES_FEATURES: usize = 5;

pub struct DiabetesModel {
    session: Option<Mutex<Session>>,
    scaler: FeatureScaler,
}

impl DiabetesModel {
    pub fn load(dir: &Path) -> Self {
        Self {
            session: load_session(&dir.join("model.onnx")),
            scaler: FeatureScaler::load_or_identity(&dir.join("scaler.json")),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// Probability of diabetes, `0.0..=1.0`
    pub fn predict(&self, features: [f32; DIABETES_FEATURES]) -> Result<f32, PredictError> {
        let Some(session) = &self.session else {
            return Ok(Self::predict_fallback(&features));
        };

        match self.predict_onnx(session, &features) {
            Ok(prob) => Ok(prob),
            Err(e) => {
                tracing::debug!("Diabetes model failed ({}), using fallback", e);
                Ok(Self::predict_fallback(&features))
            }
        }
    }

    fn predict_onnx(
        &self,
        session: &Mutex<Session>,
        features: &[f32; DIABETES_FEATURES],
    ) -> Result<f32, PredictError> {
        let scaled = self.scaler.transform(features);
        let input = Array2::from_shape_vec((1, DIABETES_FEATURES), scaled)
            .map_err(|e| PredictError::Session(format!("Array error: {}", e)))?;

        let output = run_to_vec(&mut session.lock(), input)?;
        let prob = output
            .first()
            .copied()
            .ok_or_else(|| PredictError::Session("empty model output".to_string()))?;

        Ok(prob.clamp(0.0, 1.0))
    }

    /// Heuristic risk score over the raw (unscaled) features
    fn predict_fallback(features: &[f32; DIABETES_FEATURES]) -> f32 {
        let [gender, age, heart_disease, smoking, bmi] = *features;

        let mut risk = 0.02;

        if age > 40.0 {
            risk += ((age - 40.0) * 0.004).min(0.20);
        }
        if bmi > 25.0 {
            risk += ((bmi - 25.0) * 0.012).min(0.30);
        }
        if heart_disease > 0.0 {
            risk += 0.15;
        }

        // never=0, current=1, former=2, ever=3
        risk += match smoking as u8 {
            1 => 0.10,
            2 => 0.06,
            3 => 0.08,
            _ => 0.0,
        };

        if gender > 0.0 {
            risk += 0.02;
        }

        risk.clamp(0.0, 0.95)
    }
}
