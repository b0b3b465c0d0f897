//! Conversion of the mapped table into the model's feature matrix.

use polars::prelude::{DataFrame, DataType};

use credit_model::{BorrowerField, FIELD_COUNT, FeatureMatrix, FeatureRow};

use crate::error::ScoringError;

/// Builds the feature matrix from a mapped six-column table.
///
/// Each canonical column is cast to `Float64`. Strings that look like numbers
/// are parsed; anything else becomes null and fails here rather than inside
/// the model.
///
/// # Errors
///
/// [`ScoringError::Inference`] when a canonical column is missing, or a cell is
/// null, non-numeric or non-finite.
pub fn extract_features(mapped: &DataFrame) -> Result<FeatureMatrix, ScoringError> {
    if mapped.width() != FIELD_COUNT {
        return Err(ScoringError::inference(format!(
            "expected {FIELD_COUNT} feature columns, found {}",
            mapped.width()
        )));
    }

    let height = mapped.height();
    let mut rows: Vec<FeatureRow> = vec![[0.0; FIELD_COUNT]; height];
    for field in BorrowerField::ALL {
        let name = field.canonical_name();
        let column = mapped
            .column(name)
            .map_err(|e| ScoringError::inference(e.to_string()))?;
        let casted = column
            .cast(&DataType::Float64)
            .map_err(|e| ScoringError::inference(format!("column {name}: {e}")))?;
        let values = casted
            .f64()
            .map_err(|e| ScoringError::inference(format!("column {name}: {e}")))?;
        for (row, value) in values.iter().enumerate() {
            let problem = match value {
                Some(v) if v.is_finite() => {
                    rows[row][field.index()] = v;
                    continue;
                }
                Some(_) => "non-finite",
                // The cast nulls out unparsable strings; tell them apart from real gaps.
                None if column.get(row).is_ok_and(|raw| raw.is_null()) => "missing",
                None => "non-numeric",
            };
            return Err(ScoringError::inference(format!(
                "column {name} has a {problem} value at row {row}"
            )));
        }
    }
    Ok(FeatureMatrix::new(rows))
}
