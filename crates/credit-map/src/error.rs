//! Error types for mapping files.

use std::path::PathBuf;

use thiserror::Error;

use credit_model::MappingError;

/// Errors from loading a saved column mapping.
#[derive(Debug, Error)]
pub enum MappingFileError {
    #[error("failed to read mapping file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mapping file must be a JSON object of field name to column name: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),
}
