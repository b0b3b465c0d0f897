//! Loading the model artifact once per process.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::classifier::CreditModel;
use crate::error::ModelError;
use crate::features::FeatureMatrix;
use crate::hash::sha256_hex;
use crate::logistic::LogisticModel;

const BUNDLED_MODEL_JSON: &str = include_str!("../models/credit_model.json");

/// Where a loaded model came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Bundled,
    File(PathBuf),
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => f.write_str("bundled"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A validated model together with its provenance.
///
/// Immutable after construction; share it by reference with every scoring run.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    model: LogisticModel,
    source: ModelSource,
    sha256: String,
}

impl LoadedModel {
    /// Loads the artifact compiled into the binary.
    pub fn bundled() -> Result<Self, ModelError> {
        Self::from_json(BUNDLED_MODEL_JSON, ModelSource::Bundled)
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, ModelSource::File(path.to_path_buf()))
    }

    /// Loads from `path` when given, otherwise the bundled artifact.
    pub fn load(path: Option<&Path>) -> Result<Self, ModelError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    fn from_json(json: &str, source: ModelSource) -> Result<Self, ModelError> {
        let model = LogisticModel::from_json_str(json)?;
        let sha256 = sha256_hex(json.as_bytes());
        info!(
            model_source = %source,
            model_sha256 = %sha256,
            "model loaded"
        );
        Ok(Self {
            model,
            source,
            sha256,
        })
    }

    #[must_use]
    pub fn model(&self) -> &LogisticModel {
        &self.model
    }

    #[must_use]
    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    #[must_use]
    pub fn sha256(&self) -> &str {
        &self.sha256
    }
}

impl CreditModel for LoadedModel {
    fn predict_probability(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        self.model.predict_probability(features)
    }

    fn predict_label(&self, features: &FeatureMatrix) -> Result<Vec<u8>, ModelError> {
        self.model.predict_label(features)
    }

    fn name(&self) -> &str {
        self.model.name()
    }
}
