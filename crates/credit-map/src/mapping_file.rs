//! Saved column selections.
//!
//! A mapping file is a JSON object keyed by field (canonical name or label,
//! case-insensitive) whose values are upload column names. `null` leaves the
//! field unselected:
//!
//! ```json
//! { "Age": "years", "Monthly Income": "salary", "Credit_Lines": null }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use credit_model::{BorrowerField, ColumnMapping, ColumnSelection};

use crate::error::MappingFileError;

pub fn parse_mapping_json(json: &str) -> Result<ColumnMapping, MappingFileError> {
    let entries: BTreeMap<String, Option<String>> =
        serde_json::from_str(json).map_err(|source| MappingFileError::Parse { source })?;
    let mut mapping = ColumnMapping::new();
    for (name, column) in entries {
        let field: BorrowerField = name.parse()?;
        mapping.set(field, ColumnSelection::from(column));
    }
    Ok(mapping)
}

pub fn load_mapping_file(path: &Path) -> Result<ColumnMapping, MappingFileError> {
    let json = std::fs::read_to_string(path).map_err(|source| MappingFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mapping = parse_mapping_json(&json)?;
    debug!(
        path = %path.display(),
        unselected = mapping.unselected_fields().len(),
        "mapping file loaded"
    );
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use credit_model::MappingError;

    use super::*;

    #[test]
    fn parses_labels_and_nulls() {
        let mapping = parse_mapping_json(
            r#"{"Age": "years", "monthly income": "salary", "Credit_Lines": null}"#,
        )
        .unwrap();
        assert_eq!(mapping.get(BorrowerField::Age).as_selected(), Some("years"));
        assert_eq!(
            mapping.get(BorrowerField::MonthlyIncome).as_selected(),
            Some("salary")
        );
        assert!(!mapping.get(BorrowerField::CreditLines).is_selected());
    }

    #[test]
    fn dotted_keys_name_fields() {
        let mapping = parse_mapping_json(r#"{"credit.utilization": "util"}"#).unwrap();
        assert_eq!(
            mapping.get(BorrowerField::CreditUtilization).as_selected(),
            Some("util")
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse_mapping_json(r#"{"Zip": "zip"}"#).unwrap_err();
        assert!(matches!(
            err,
            MappingFileError::Mapping(MappingError::UnknownField { .. })
        ));
    }

    #[test]
    fn non_object_is_parse_error() {
        let err = parse_mapping_json(r#"["Age"]"#).unwrap_err();
        assert!(matches!(err, MappingFileError::Parse { .. }));
    }
}
