#![forbid(unsafe_code)]

//! Errors reported synchronously by carousel entry points.
//!
//! Everything the engine does after validation is a total function, so the
//! only failures are caller contract violations: bad options, unknown cell
//! ids, or non-finite measurements.

use thiserror::Error;

use crate::cells::CellId;

pub type Result<T> = std::result::Result<T, CarouselError>;

#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("invalid options: {}", errors.join("; "))]
    InvalidOptions { errors: Vec<String> },

    #[error("unknown cell: {id}")]
    UnknownCell { id: CellId },

    #[error("invalid measurement: {field} = {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[cfg(feature = "config")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CarouselError {
    #[must_use]
    pub fn invalid_options(errors: Vec<String>) -> Self {
        Self::InvalidOptions { errors }
    }

    /// Whether the error came from option validation.
    #[must_use]
    pub fn is_invalid_options(&self) -> bool {
        matches!(self, Self::InvalidOptions { .. })
    }
}
