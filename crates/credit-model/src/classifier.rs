use crate::error::ModelError;
use crate::features::FeatureMatrix;

/// A pre-trained binary default classifier.
///
/// Both predictions are batch calls over the whole matrix and must return one
/// value per row, aligned with row order. Implementations are read-only and
/// may be invoked repeatedly.
pub trait CreditModel {
    /// Probability of the positive (default) class for each row, in `[0, 1]`.
    fn predict_probability(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError>;

    /// Predicted label (`0` or `1`) for each row.
    fn predict_label(&self, features: &FeatureMatrix) -> Result<Vec<u8>, ModelError>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "credit-model"
    }
}

impl<M: CreditModel + ?Sized> CreditModel for &M {
    fn predict_probability(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        (**self).predict_probability(features)
    }

    fn predict_label(&self, features: &FeatureMatrix) -> Result<Vec<u8>, ModelError> {
        (**self).predict_label(features)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
