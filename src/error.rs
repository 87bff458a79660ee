// Error types for the duff application.
// Covers upstream API errors, persistence errors, and response shape mismatches.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuffError {
    #[error("HTTP {status} from {url}")]
    Request { status: u16, url: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

pub type Result<T> = std::result::Result<T, DuffError>;
