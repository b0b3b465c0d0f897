//! The column mapper.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame};
use tracing::debug;

use credit_model::{BorrowerField, ColumnMapping, FIELD_COUNT, MappingError};

fn table_error(error: impl ToString) -> MappingError {
    MappingError::Table {
        message: error.to_string(),
    }
}

/// Selects and renames the six mapped columns of `frame`.
///
/// The result has exactly the canonical column names, in canonical order, and
/// carries the source values unchanged (no type coercion). Checks run in
/// order: any unselected field, then unknown columns, then a column chosen
/// twice.
///
/// # Errors
///
/// - [`MappingError::Incomplete`] when any field is unselected
/// - [`MappingError::UnknownColumn`] when a selection is not a column of `frame`
/// - [`MappingError::DuplicateColumn`] when two fields share a column
pub fn map_columns(frame: &DataFrame, mapping: &ColumnMapping) -> Result<DataFrame, MappingError> {
    let selected = mapping.resolve()?;

    let available: BTreeSet<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut seen: BTreeMap<&str, BorrowerField> = BTreeMap::new();
    for (field, column) in BorrowerField::ALL.into_iter().zip(selected) {
        if !available.contains(column) {
            return Err(MappingError::UnknownColumn {
                field,
                column: column.to_string(),
            });
        }
        if let Some(first) = seen.insert(column, field) {
            return Err(MappingError::DuplicateColumn {
                column: column.to_string(),
                first,
                second: field,
            });
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(FIELD_COUNT);
    for (field, source) in BorrowerField::ALL.into_iter().zip(selected) {
        let mut column = frame.column(source).map_err(table_error)?.clone();
        column.rename(field.canonical_name().into());
        debug!(
            field = %field,
            source_column = %source,
            dtype = %column.dtype(),
            "field mapped"
        );
        columns.push(column);
    }
    DataFrame::new(columns).map_err(table_error)
}
