//! Error types for palette operations.

use thiserror::Error;

/// Main error type for the color engine and palette store.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("invalid hex color '{input}': expected 6 hex digits with optional '#'")]
    InvalidFormat { input: String },

    #[error("slot index {index} out of range (palette has {len} slots)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("history persistence failed: {message}")]
    PersistenceFailure { message: String },

    #[error("{format} export failed: {message}")]
    ExportFailure { format: String, message: String },

    #[error("no saved palette with id {id}")]
    HistoryEntryNotFound { id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaletteError {
    pub(crate) fn invalid_format(input: &str) -> Self {
        PaletteError::InvalidFormat {
            input: input.to_string(),
        }
    }

    pub(crate) fn export(format: &str, message: impl std::fmt::Display) -> Self {
        PaletteError::ExportFailure {
            format: format.to_string(),
            message: message.to_string(),
        }
    }

    /// True for errors raised by the history backend.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            PaletteError::PersistenceFailure { .. } | PaletteError::Io(_) | PaletteError::Json(_)
        )
    }
}

/// Result type alias for palette operations.
pub type Result<T> = std::result::Result<T, PaletteError>;
