//! Column hints used to weigh mapping suggestions.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame, DataType};

/// Summary statistics for one upload column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHint {
    /// `None` when the column holds no values to judge.
    pub is_numeric: Option<bool>,
    pub unique_ratio: f64,
    pub null_ratio: f64,
}

/// Builds column hints from a DataFrame.
///
/// Analyzes each column to determine:
/// - Whether values are numeric
/// - Ratio of unique values (cardinality)
/// - Ratio of null/missing values
pub fn build_column_hints(df: &DataFrame) -> BTreeMap<String, ColumnHint> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), analyze_column(col)))
        .collect()
}

fn analyze_column(col: &Column) -> ColumnHint {
    let total = col.len();
    if total == 0 {
        return ColumnHint {
            is_numeric: None,
            unique_ratio: 0.0,
            null_ratio: 1.0,
        };
    }

    if col.dtype().is_primitive_numeric() {
        let null_count = col.null_count();
        let non_null = total - null_count;
        let unique = col.n_unique().unwrap_or(non_null);
        return ColumnHint {
            is_numeric: (non_null > 0).then_some(true),
            unique_ratio: ratio(unique.min(non_null), non_null),
            null_ratio: ratio(null_count, total),
        };
    }

    let mut null_count = 0usize;
    let mut numeric_count = 0usize;
    let mut unique_values: BTreeSet<String> = BTreeSet::new();
    if let Ok(str_col) = col.cast(&DataType::String) {
        if let Ok(chunked) = str_col.str() {
            for value in chunked.iter() {
                match value.map(str::trim) {
                    Some(trimmed) if !trimmed.is_empty() => {
                        if trimmed.parse::<f64>().is_ok() {
                            numeric_count += 1;
                        }
                        unique_values.insert(trimmed.to_string());
                    }
                    _ => null_count += 1,
                }
            }
        }
    }

    let non_null = total - null_count.min(total);
    ColumnHint {
        // Determine if numeric (>90% of non-null values are numeric)
        is_numeric: (non_null > 0).then(|| ratio(numeric_count, non_null) > 0.9),
        unique_ratio: ratio(unique_values.len(), non_null),
        null_ratio: ratio(null_count, total),
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
