use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot decode image data: {0}")]
    Decode(String),

    #[error("Cannot reconcile frame sizes: {reference_width}x{reference_height} vs {width}x{height}")]
    DimensionMismatch {
        reference_width: u32,
        reference_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Cannot open video source {path}: {reason}")]
    VideoOpen { path: PathBuf, reason: String },

    #[error("Unsupported color mode: {0}")]
    UnsupportedColorMode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Reference store error: {0}")]
    Store(String),

    #[error("History log error: {0}")]
    History(#[from] serde_json::Error),

    #[error("Inspection is missing angles: {}", .missing.join(", "))]
    IncompleteInspection { missing: Vec<String> },
}

impl InspectError {
    pub(crate) fn video_open(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::VideoOpen {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<image::ImageError> for InspectError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Decode(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;
