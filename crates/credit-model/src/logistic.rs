//! Logistic regression artifact.
//!
//! The artifact is the inference half of a standard-scaler + logistic-regression
//! pipeline, serialized as JSON. Only prediction is supported; the coefficients
//! are produced by an offline training job.

use serde::{Deserialize, Serialize};

use crate::classifier::CreditModel;
use crate::error::ModelError;
use crate::features::{FeatureMatrix, FeatureRow};
use crate::field::{BorrowerField, FIELD_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
}

/// Per-feature standardization applied before the linear term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticModel {
    pub kind: ModelKind,
    /// Must equal the canonical field names, in canonical order.
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn invalid(message: impl Into<String>) -> ModelError {
    ModelError::InvalidArtifact {
        message: message.into(),
    }
}

fn check_vector(name: &str, values: &[f64]) -> Result<(), ModelError> {
    if values.len() != FIELD_COUNT {
        return Err(invalid(format!(
            "{name} has {} entries, expected {FIELD_COUNT}",
            values.len()
        )));
    }
    if let Some(idx) = values.iter().position(|value| !value.is_finite()) {
        return Err(invalid(format!(
            "{name}[{idx}] ({}) is not finite",
            BorrowerField::ALL[idx]
        )));
    }
    Ok(())
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl LogisticModel {
    /// Parses and validates a JSON artifact.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let model: Self =
            serde_json::from_str(json).map_err(|source| ModelError::Parse { source })?;
        model.validate()?;
        Ok(model)
    }

    /// Checks feature order, vector lengths and numeric sanity.
    pub fn validate(&self) -> Result<(), ModelError> {
        let expected: Vec<&str> = BorrowerField::ALL
            .iter()
            .map(|field| field.canonical_name())
            .collect();
        if self.feature_names != expected {
            return Err(invalid(format!(
                "feature_names must be [{}], found [{}]",
                expected.join(", "),
                self.feature_names.join(", ")
            )));
        }
        check_vector("coefficients", &self.coefficients)?;
        if !self.intercept.is_finite() {
            return Err(invalid("intercept is not finite"));
        }
        if let Some(scaler) = &self.scaler {
            check_vector("scaler.mean", &scaler.mean)?;
            check_vector("scaler.scale", &scaler.scale)?;
            if let Some(idx) = scaler.scale.iter().position(|value| *value == 0.0) {
                return Err(invalid(format!(
                    "scaler.scale[{idx}] ({}) is zero",
                    BorrowerField::ALL[idx]
                )));
            }
        }
        Ok(())
    }

    fn decision(&self, row_idx: usize, row: &FeatureRow) -> Result<f64, ModelError> {
        let mut z = self.intercept;
        for field in BorrowerField::ALL {
            let idx = field.index();
            let value = row[idx];
            if !value.is_finite() {
                return Err(ModelError::NonFinite {
                    row: row_idx,
                    field,
                });
            }
            let scaled = match &self.scaler {
                Some(scaler) => (value - scaler.mean[idx]) / scaler.scale[idx],
                None => value,
            };
            z += self.coefficients[idx] * scaled;
        }
        Ok(z)
    }

    /// Signed distance from the decision boundary for each row.
    pub fn decision_function(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        self.validate()?;
        features
            .rows()
            .iter()
            .enumerate()
            .map(|(row_idx, row)| self.decision(row_idx, row))
            .collect()
    }
}

impl CreditModel for LogisticModel {
    fn predict_probability(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        Ok(self
            .decision_function(features)?
            .into_iter()
            .map(sigmoid)
            .collect())
    }

    /// Label 1 when the decision value is strictly positive.
    fn predict_label(&self, features: &FeatureMatrix) -> Result<Vec<u8>, ModelError> {
        Ok(self
            .decision_function(features)?
            .into_iter()
            .map(|z| u8::from(z > 0.0))
            .collect())
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}
