//! Column mapping for borrower uploads.
//!
//! - [`map_columns`] turns an upload plus a complete [`ColumnMapping`] into the
//!   six-column table the model expects.
//! - [`load_mapping_file`] reads saved selections from JSON.
//! - [`SuggestionEngine`] proposes selections by fuzzy-matching column names.
//!
//! [`ColumnMapping`]: credit_model::ColumnMapping

mod error;
mod hints;
mod mapper;
mod mapping_file;
mod suggest;

pub use error::MappingFileError;
pub use hints::{ColumnHint, build_column_hints};
pub use mapper::map_columns;
pub use mapping_file::{load_mapping_file, parse_mapping_json};
pub use suggest::{
    ConfidenceLevel, ConfidenceThresholds, MappingSuggestion, MappingSuggestions,
    SuggestionEngine,
};
