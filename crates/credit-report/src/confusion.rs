//! Actual vs. predicted default counts.

use polars::prelude::{Column, DataFrame};
use tracing::{debug, warn};

use credit_common::any_to_binary_label;
use credit_model::GROUND_TRUTH_COLUMN;
use credit_score::PREDICTED_DEFAULT_COLUMN;

use crate::error::{ReportError, Result};

/// 2x2 confusion matrix indexed as `[actual][predicted]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: [[usize; 2]; 2],
    skipped: usize,
}

impl ConfusionMatrix {
    /// Builds the matrix from a scored table.
    ///
    /// Returns `Ok(None)` when the table has no `Defaulted` column. Rows whose
    /// actual label is missing or not 0/1 are skipped and counted.
    pub fn from_frame(frame: &DataFrame) -> Result<Option<Self>> {
        let has_ground_truth = frame
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == GROUND_TRUTH_COLUMN);
        if !has_ground_truth {
            debug!("no ground truth column, confusion matrix omitted");
            return Ok(None);
        }
        let actual = frame
            .column(GROUND_TRUTH_COLUMN)
            .map_err(|e| ReportError::Frame {
                message: e.to_string(),
            })?;
        let predicted =
            frame
                .column(PREDICTED_DEFAULT_COLUMN)
                .map_err(|_| ReportError::MissingColumn {
                    column: PREDICTED_DEFAULT_COLUMN.to_string(),
                })?;

        let mut matrix = Self::default();
        for row in 0..frame.height() {
            let read = |column: &Column| {
                column
                    .get(row)
                    .map_err(|e| ReportError::Frame {
                        message: e.to_string(),
                    })
                    .map(any_to_binary_label)
            };
            match (read(actual)?, read(predicted)?) {
                (Some(a), Some(p)) => matrix.record(a, p),
                _ => matrix.skipped += 1,
            }
        }
        if matrix.skipped > 0 {
            warn!(
                skipped = matrix.skipped,
                column = GROUND_TRUTH_COLUMN,
                "rows without a 0/1 outcome were left out of the confusion matrix"
            );
        }
        Ok(Some(matrix))
    }

    /// Builds the matrix from aligned label slices; pairs with a non-0/1 label are skipped.
    #[must_use]
    pub fn from_labels(actual: &[u8], predicted: &[u8]) -> Self {
        let mut matrix = Self::default();
        for (&a, &p) in actual.iter().zip(predicted) {
            if a > 1 || p > 1 {
                matrix.skipped += 1;
            } else {
                matrix.record(a, p);
            }
        }
        matrix
    }

    fn record(&mut self, actual: u8, predicted: u8) {
        self.counts[usize::from(actual)][usize::from(predicted)] += 1;
    }

    /// Count for one cell; labels above 1 read as zero.
    #[must_use]
    pub fn get(&self, actual: u8, predicted: u8) -> usize {
        self.counts
            .get(usize::from(actual))
            .and_then(|row| row.get(usize::from(predicted)))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn true_negatives(&self) -> usize {
        self.counts[0][0]
    }

    #[must_use]
    pub fn false_positives(&self) -> usize {
        self.counts[0][1]
    }

    #[must_use]
    pub fn false_negatives(&self) -> usize {
        self.counts[1][0]
    }

    #[must_use]
    pub fn true_positives(&self) -> usize {
        self.counts[1][1]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    #[must_use]
    pub fn max_cell(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
