// API-specific data models for the web server

use serde::{Deserialize, Serialize};

/// Response to a successful GIF creation request
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateGifResponse {
    pub message: String,
    /// Output file size in MB, rounded to two decimals.
    pub size: f64,
    /// Relative path the artifact can be fetched from.
    pub path: String,
}

/// Query parameters for the size preview endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PreviewSizeQuery {
    pub quality: Option<String>,
}

/// Response to a size preview request
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PreviewSizeResponse {
    /// Estimated output size in MB.
    pub size: f64,
}
