use std::path::PathBuf;

use fcarousel_core::CarouselError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("carousel error: {0}")]
    Carousel(#[from] CarouselError),

    #[error("unsupported scenario format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("step {step}: no cell in slot {slot}")]
    UnknownSlot { step: usize, slot: usize },

    #[error("step {step}: animation did not settle within {frames} frames")]
    Unsettled { step: usize, frames: u32 },

    #[error("trace hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },
}

impl HarnessError {
    /// Process exit code for the CLI.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HashMismatch { .. } => 3,
            Self::Unsettled { .. } => 4,
            _ => 1,
        }
    }
}
