use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// The scored table lacks a column the report needs.
    #[error("scored table is missing column '{column}'")]
    MissingColumn { column: String },

    #[error("failed to read scored table: {message}")]
    Frame { message: String },
}

impl From<csv::Error> for ReportError {
    fn from(source: csv::Error) -> Self {
        Self::Csv { source }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
