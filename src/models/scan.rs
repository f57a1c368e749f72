//! Food scan types

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// URL of the image to classify
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub objects: Vec<String>,
}
