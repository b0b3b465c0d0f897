//! Error types for column mapping and model inference.

use std::path::PathBuf;

use thiserror::Error;

use crate::field::BorrowerField;

fn join_fields(fields: &[BorrowerField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while turning user selections into a mapped table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// One or more fields have no column selected.
    #[error("please map all fields before scoring (unmapped: {})", join_fields(.fields))]
    Incomplete { fields: Vec<BorrowerField> },

    /// The selected column does not exist in the uploaded table.
    #[error("column '{column}' selected for {field} is not present in the uploaded table")]
    UnknownColumn { field: BorrowerField, column: String },

    /// The same source column was chosen for two fields.
    #[error("column '{column}' is selected for both {first} and {second}")]
    DuplicateColumn {
        column: String,
        first: BorrowerField,
        second: BorrowerField,
    },

    /// A mapping key does not name one of the six fields.
    #[error("unknown borrower field '{name}'")]
    UnknownField { name: String },

    /// Assembling the mapped table failed.
    #[error("failed to build mapped table: {message}")]
    Table { message: String },
}

/// Errors from loading a model artifact or running predictions.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {message}")]
    InvalidArtifact { message: String },

    /// A feature value is NaN or infinite.
    #[error("non-finite value for {field} at row {row}")]
    NonFinite { row: usize, field: BorrowerField },

    #[error("prediction failed: {message}")]
    Prediction { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_lists_field_labels() {
        let err = MappingError::Incomplete {
            fields: vec![BorrowerField::Age, BorrowerField::CreditLines],
        };
        assert_eq!(
            err.to_string(),
            "please map all fields before scoring (unmapped: Age, Credit Lines)"
        );
    }
}
