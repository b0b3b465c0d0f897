//! The uploaded borrower table.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::info;

use credit_model::GROUND_TRUTH_COLUMN;

use crate::error::Result;
use crate::reader::read_csv_frame;

/// Rows shown in the upload preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// A user upload: the raw table exactly as read, plus where it came from.
#[derive(Debug, Clone)]
pub struct UploadedTable {
    source: PathBuf,
    frame: DataFrame,
}

impl UploadedTable {
    pub fn load(path: &Path) -> Result<Self> {
        let frame = read_csv_frame(path)?;
        info!(
            source_filename = %path.display(),
            rows = frame.height(),
            columns = frame.width(),
            "upload loaded"
        );
        Ok(Self::from_frame(path, frame))
    }

    pub fn from_frame(source: impl Into<PathBuf>, frame: DataFrame) -> Self {
        Self {
            source: source.into(),
            frame,
        }
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    #[must_use]
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Column names in file order; these are the choices offered per field.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    /// First `rows` rows of the upload.
    #[must_use]
    pub fn preview(&self, rows: usize) -> DataFrame {
        self.frame.head(Some(rows))
    }

    /// Whether the upload carries actual outcomes for a confusion matrix.
    #[must_use]
    pub fn has_ground_truth(&self) -> bool {
        self.columns().iter().any(|name| name == GROUND_TRUTH_COLUMN)
    }
}
