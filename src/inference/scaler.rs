//! Feature scaling
//!
//! Standard scaling `(x - mean) / scale`, with parameters exported at
//! training time into a `scaler.json` sidecar next to the model.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl FeatureScaler {
    /// Load from a sidecar file; identity scaler when the file is absent
    /// or malformed (logged, never fatal).
    pub fn load_or_identity(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(scaler) => scaler,
                Err(e) => {
                    tracing::warn!("Invalid scaler sidecar {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::warn!("Scaler sidecar not found: {}", path.display());
                Self::default()
            }
        }
    }

    /// Scale a feature vector. Indices without parameters pass through;
    /// zero scale entries are treated as 1.
    pub fn transform(&self, features: &[f32]) -> Vec<f32> {
        features
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let mean = self.mean.get(i).copied().unwrap_or(0.0);
                let scale = self.scale.get(i).copied().unwrap_or(1.0);
                let scale = if scale == 0.0 { 1.0 } else { scale };
                (x - mean) / scale
            })
            .collect()
    }
}
