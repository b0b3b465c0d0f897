//! Batch scoring of an uploaded table.

use std::collections::BTreeMap;
use std::time::Instant;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{info, info_span, trace};

use credit_map::map_columns;
use credit_model::{
    ColumnMapping, CreditModel, FeatureMatrix, GROUND_TRUTH_COLUMN, RiskCategory, classify,
};

use crate::error::ScoringError;
use crate::features::extract_features;
use crate::rounding::round_probability;

pub const PREDICTED_PROB_COLUMN: &str = "Predicted_Prob";
pub const RISK_CATEGORY_COLUMN: &str = "Risk_Category";
pub const PREDICTED_DEFAULT_COLUMN: &str = "Predicted_Default";

/// Model output for one uploaded row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord {
    pub probability: f64,
    pub rounded_probability: f64,
    pub risk: RiskCategory,
    pub predicted_default: u8,
}

/// The upload with derived columns appended, plus the per-row results.
#[derive(Debug, Clone)]
pub struct ScoredFrame {
    frame: DataFrame,
    records: Vec<ScoredRecord>,
}

impl ScoredFrame {
    #[must_use]
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    #[must_use]
    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rounded probabilities in row order.
    pub fn rounded_probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|record| record.rounded_probability)
    }

    /// Row count per risk band; every band is present, possibly with zero.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<RiskCategory, usize> {
        let mut counts: BTreeMap<RiskCategory, usize> =
            RiskCategory::ALL.into_iter().map(|risk| (risk, 0)).collect();
        for record in &self.records {
            *counts.entry(record.risk).or_default() += 1;
        }
        counts
    }

    #[must_use]
    pub fn has_ground_truth(&self) -> bool {
        self.frame
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == GROUND_TRUTH_COLUMN)
    }
}

/// Maps, predicts and appends results.
pub struct ScoringPipeline<'m> {
    model: &'m dyn CreditModel,
}

impl<'m> ScoringPipeline<'m> {
    #[must_use]
    pub fn new(model: &'m dyn CreditModel) -> Self {
        Self { model }
    }

    /// Scores every row of `upload` using the columns chosen in `mapping`.
    ///
    /// The model is called once for probabilities and once for labels. On any
    /// error nothing is returned; `upload` is never modified.
    ///
    /// # Errors
    ///
    /// - [`ScoringError::Mapping`] when the selections are incomplete or invalid
    /// - [`ScoringError::Inference`] when features cannot be built or the model
    ///   fails or returns malformed output
    pub fn score(
        &self,
        upload: &DataFrame,
        mapping: &ColumnMapping,
    ) -> Result<ScoredFrame, ScoringError> {
        let span = info_span!("score", rows = upload.height(), model = self.model.name());
        let _guard = span.enter();
        let start = Instant::now();

        let mapped = map_columns(upload, mapping)?;
        let features = extract_features(&mapped)?;
        let records = self.predict(&features)?;
        let frame = append_results(upload, &records)?;

        let scored = ScoredFrame { frame, records };
        let counts = scored.category_counts();
        info!(
            rows = scored.len(),
            low = counts[&RiskCategory::Low],
            medium = counts[&RiskCategory::Medium],
            high = counts[&RiskCategory::High],
            duration_ms = start.elapsed().as_millis(),
            "scoring complete"
        );
        Ok(scored)
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<ScoredRecord>, ScoringError> {
        let probabilities = self.model.predict_probability(features)?;
        let labels = self.model.predict_label(features)?;
        let expected = features.len();
        if probabilities.len() != expected {
            return Err(ScoringError::inference(format!(
                "model returned {} probabilities for {expected} rows",
                probabilities.len()
            )));
        }
        if labels.len() != expected {
            return Err(ScoringError::inference(format!(
                "model returned {} labels for {expected} rows",
                labels.len()
            )));
        }

        let mut records = Vec::with_capacity(expected);
        for (row, (probability, label)) in probabilities.into_iter().zip(labels).enumerate() {
            if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
                return Err(ScoringError::inference(format!(
                    "model returned probability {probability} at row {row}"
                )));
            }
            if label > 1 {
                return Err(ScoringError::inference(format!(
                    "model returned label {label} at row {row}"
                )));
            }
            let record = ScoredRecord {
                probability,
                rounded_probability: round_probability(probability),
                risk: classify(probability),
                predicted_default: label,
            };
            trace!(row, probability, risk = %record.risk, label, "row scored");
            records.push(record);
        }
        Ok(records)
    }
}

/// Appends the derived columns to a copy of `upload`. Same-named columns are replaced.
fn append_results(upload: &DataFrame, records: &[ScoredRecord]) -> Result<DataFrame, ScoringError> {
    let probabilities: Vec<f64> = records.iter().map(|r| r.rounded_probability).collect();
    let categories: Vec<&str> = records.iter().map(|r| r.risk.as_str()).collect();
    let labels: Vec<i32> = records.iter().map(|r| i32::from(r.predicted_default)).collect();

    let mut frame = upload.clone();
    for column in [
        Series::new(PREDICTED_PROB_COLUMN.into(), probabilities).into_column(),
        Series::new(RISK_CATEGORY_COLUMN.into(), categories).into_column(),
        Series::new(PREDICTED_DEFAULT_COLUMN.into(), labels).into_column(),
    ] {
        frame
            .with_column(column)
            .map_err(|e| ScoringError::Frame {
                message: e.to_string(),
            })?;
    }
    Ok(frame)
}
