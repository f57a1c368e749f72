//! Food image classifier
//!
//! Decodes an image, resizes to 224x224 RGB, scales pixels to [0, 1] and
//! runs the classifier over an NHWC batch of one. There is no heuristic
//! fallback: without a model, scanning is an error.

use std::path::Path;

use image::imageops::FilterType;
use ndarray::Array4;
use ort::session::Session;
use parking_lot::Mutex;

use super::labels::LabelTable;
use super::{load_session, run_to_vec, PredictError};

pub const IMAGE_SIZE: u32 = 224;
pub const SCORE_THRESHOLD: f32 = 0.5;

pub struct FoodClassifier {
    session: Option<Mutex<Session>>,
    labels: LabelTable,
}

impl FoodClassifier {
    pub fn load(dir: &Path) -> Self {
        Self {
            session: load_session(&dir.join("model.onnx")),
            labels: LabelTable::load_or_empty(&dir.join("labels.json")),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some() && !self.labels.is_empty()
    }

    /// Labels whose score clears the threshold, best first
    pub fn classify(&self, image_bytes: &[u8]) -> Result<Vec<String>, PredictError> {
        let session = self.session.as_ref().ok_or(PredictError::NotLoaded)?;
        if self.labels.is_empty() {
            return Err(PredictError::Session("label table is empty".to_string()));
        }

        let input = preprocess(image_bytes)?;
        let scores = run_to_vec(&mut session.lock(), input)?;

        let mut scored: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, score)| *score >= SCORE_THRESHOLD)
            .collect();
        scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        Ok(scored
            .into_iter()
            .filter_map(|(id, _)| self.labels.decode(id).map(str::to_string))
            .collect())
    }
}

/// Decode, resize and normalize an image into a `[1, H, W, 3]` tensor
pub(crate) fn preprocess(image_bytes: &[u8]) -> Result<Array4<f32>, PredictError> {
    let decoded = image::load_from_memory(image_bytes)
        .map_err(|e| PredictError::BadInput(format!("image could not be decoded: {}", e)))?;

    // to_rgb8 also drops an alpha channel when present
    let resized = decoded
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Triangle)
        .to_rgb8();

    let size = IMAGE_SIZE as usize;
    let mut input = Array4::<f32>::zeros((1, size, size, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for channel in 0..3 {
            input[[0, y as usize, x as usize, channel]] = pixel.0[channel] as f32 / 255.0;
        }
    }

    Ok(input)
}
