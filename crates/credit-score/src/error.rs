//! Error types for scoring runs.

use thiserror::Error;

use credit_model::{MappingError, ModelError};

/// Errors surfaced to the user from a scoring run.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The selections could not produce a mapped table; nothing was scored.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The model call failed; no results were produced.
    #[error("an error occurred during inference: {message}")]
    Inference { message: String },

    /// Appending the derived columns to the upload failed.
    #[error("failed to attach score columns: {message}")]
    Frame { message: String },
}

impl ScoringError {
    pub(crate) fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }
}

impl From<ModelError> for ScoringError {
    fn from(error: ModelError) -> Self {
        Self::inference(error.to_string())
    }
}
