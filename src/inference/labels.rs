//! Class-id to label decoding, from a `labels.json` sidecar

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelTable {
    pub classes: Vec<String>,
}

impl LabelTable {
    pub fn load_or_empty(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(table) => table,
                Err(e) => {
                    tracing::warn!("Invalid label sidecar {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::warn!("Label sidecar not found: {}", path.display());
                Self::default()
            }
        }
    }

    pub fn decode(&self, class_id: usize) -> Option<&str> {
        self.classes.get(class_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
