//! Credit scoring domain model.
//!
//! This crate holds the types every other crate in the workspace speaks:
//!
//! - [`BorrowerField`]: the six logical input fields, in canonical order
//! - [`ColumnSelection`] / [`ColumnMapping`]: the user's choice of source column per field
//! - [`RiskCategory`] and [`classify`]: the three ordinal risk bands
//! - [`FeatureMatrix`] and [`CreditModel`]: the inference boundary
//! - [`LogisticModel`] / [`LoadedModel`]: the pre-trained artifact loaded once per process

mod artifact;
mod classifier;
mod error;
mod features;
mod field;
mod hash;
mod logistic;
mod risk;
mod selection;

pub use artifact::{LoadedModel, ModelSource};
pub use classifier::CreditModel;
pub use error::{MappingError, ModelError};
pub use features::{FeatureMatrix, FeatureRow};
pub use field::{BorrowerField, FIELD_COUNT, GROUND_TRUTH_COLUMN, normalize_field_name};
pub use hash::sha256_hex;
pub use logistic::{LogisticModel, ModelKind, StandardScaler};
pub use risk::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, RiskCategory, classify};
pub use selection::{ColumnMapping, ColumnSelection};
