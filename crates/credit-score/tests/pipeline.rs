//! End-to-end scoring with stub models.

use polars::prelude::{AnyValue, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

use credit_model::{
    BorrowerField, ColumnMapping, CreditModel, FeatureMatrix, LoadedModel, MappingError,
    ModelError, RiskCategory,
};
use credit_score::{
    PREDICTED_DEFAULT_COLUMN, PREDICTED_PROB_COLUMN, RISK_CATEGORY_COLUMN, ScoringError,
    ScoringPipeline, round_probability,
};

/// Returns the same probability and label for every row.
struct FixedModel {
    probability: f64,
    label: u8,
}

impl CreditModel for FixedModel {
    fn predict_probability(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        Ok(vec![self.probability; features.len()])
    }

    fn predict_label(&self, features: &FeatureMatrix) -> Result<Vec<u8>, ModelError> {
        Ok(vec![self.label; features.len()])
    }
}

struct FailingModel;

impl CreditModel for FailingModel {
    fn predict_probability(&self, _features: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::Prediction {
            message: "feature shape mismatch".to_string(),
        })
    }

    fn predict_label(&self, _features: &FeatureMatrix) -> Result<Vec<u8>, ModelError> {
        Ok(Vec::new())
    }
}

/// Drops the last row of output.
struct ShortModel;

impl CreditModel for ShortModel {
    fn predict_probability(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        Ok(vec![0.5; features.len().saturating_sub(1)])
    }

    fn predict_label(&self, features: &FeatureMatrix) -> Result<Vec<u8>, ModelError> {
        Ok(vec![0; features.len()])
    }
}

fn single_borrower() -> DataFrame {
    DataFrame::new(vec![
        Series::new("borrower".into(), &["b-1"]).into_column(),
        Series::new("Age".into(), &[30i64]).into_column(),
        Series::new("Monthly Income".into(), &[5000.0f64]).into_column(),
        Series::new("Total Debt".into(), &[2000.0f64]).into_column(),
        Series::new("Credit Utilization".into(), &[0.3f64]).into_column(),
        Series::new("Missed Payments".into(), &[0i64]).into_column(),
        Series::new("Credit Lines".into(), &[3i64]).into_column(),
    ])
    .unwrap()
}

fn label_mapping() -> ColumnMapping {
    BorrowerField::ALL
        .into_iter()
        .fold(ColumnMapping::new(), |mapping, field| {
            mapping.with(field, field.label())
        })
}

fn score_with(model: &dyn CreditModel) -> Result<credit_score::ScoredFrame, ScoringError> {
    ScoringPipeline::new(model).score(&single_borrower(), &label_mapping())
}

fn cell<'a>(frame: &'a DataFrame, column: &str) -> AnyValue<'a> {
    frame.column(column).unwrap().get(0).unwrap()
}

#[test]
fn low_probability_is_low_risk() {
    let scored = score_with(&FixedModel {
        probability: 0.35,
        label: 0,
    })
    .unwrap();
    let frame = scored.frame();
    assert_eq!(cell(frame, PREDICTED_PROB_COLUMN), AnyValue::Float64(0.35));
    assert_eq!(cell(frame, RISK_CATEGORY_COLUMN), AnyValue::String("Low"));
    assert_eq!(cell(frame, PREDICTED_DEFAULT_COLUMN), AnyValue::Int32(0));
}

#[test]
fn mid_probability_is_medium_risk() {
    let scored = score_with(&FixedModel {
        probability: 0.65,
        label: 0,
    })
    .unwrap();
    assert_eq!(scored.records()[0].risk, RiskCategory::Medium);
    assert_eq!(
        cell(scored.frame(), RISK_CATEGORY_COLUMN),
        AnyValue::String("Medium")
    );
}

#[test]
fn high_probability_is_high_risk() {
    let scored = score_with(&FixedModel {
        probability: 0.95,
        label: 1,
    })
    .unwrap();
    let frame = scored.frame();
    assert_eq!(cell(frame, RISK_CATEGORY_COLUMN), AnyValue::String("High"));
    assert_eq!(cell(frame, PREDICTED_DEFAULT_COLUMN), AnyValue::Int32(1));
}

#[test]
fn risk_uses_unrounded_probability() {
    // 0.396 displays as 0.40 but stays Low.
    let scored = score_with(&FixedModel {
        probability: 0.396,
        label: 0,
    })
    .unwrap();
    let record = scored.records()[0];
    assert_eq!(record.rounded_probability, 0.4);
    assert_eq!(record.risk, RiskCategory::Low);
}

#[test]
fn label_is_taken_from_model_not_probability() {
    let scored = score_with(&FixedModel {
        probability: 0.9,
        label: 0,
    })
    .unwrap();
    assert_eq!(
        cell(scored.frame(), PREDICTED_DEFAULT_COLUMN),
        AnyValue::Int32(0)
    );
}

#[test]
fn original_columns_are_preserved() {
    let scored = score_with(&FixedModel {
        probability: 0.2,
        label: 0,
    })
    .unwrap();
    let names: Vec<String> = scored
        .frame()
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "borrower",
            "Age",
            "Monthly Income",
            "Total Debt",
            "Credit Utilization",
            "Missed Payments",
            "Credit Lines",
            "Predicted_Prob",
            "Risk_Category",
            "Predicted_Default",
        ]
    );
    assert_eq!(
        scored.frame().column(PREDICTED_DEFAULT_COLUMN).unwrap().dtype(),
        &DataType::Int32
    );
}

#[test]
fn existing_derived_column_is_replaced() {
    let mut upload = single_borrower();
    upload
        .with_column(Series::new("Risk_Category".into(), &["stale"]).into_column())
        .unwrap();
    let model = FixedModel {
        probability: 0.8,
        label: 1,
    };
    let scored = ScoringPipeline::new(&model)
        .score(&upload, &label_mapping())
        .unwrap();
    assert_eq!(scored.frame().width(), upload.width() + 2);
    assert_eq!(
        cell(scored.frame(), RISK_CATEGORY_COLUMN),
        AnyValue::String("High")
    );
}

#[test]
fn incomplete_mapping_scores_nothing() {
    let mut mapping = label_mapping();
    mapping.clear(BorrowerField::MissedPayments);
    let model = FixedModel {
        probability: 0.5,
        label: 0,
    };
    let err = ScoringPipeline::new(&model)
        .score(&single_borrower(), &mapping)
        .unwrap_err();
    assert!(matches!(
        err,
        ScoringError::Mapping(MappingError::Incomplete { ref fields })
            if fields == &[BorrowerField::MissedPayments]
    ));
}

#[test]
fn model_failure_is_inference_error_with_cause() {
    let err = score_with(&FailingModel).unwrap_err();
    assert!(matches!(err, ScoringError::Inference { .. }));
    assert!(err.to_string().contains("feature shape mismatch"));
}

#[test]
fn short_model_output_is_rejected() {
    let upload = DataFrame::new(vec![
        Series::new("Age".into(), &[30i64, 40]).into_column(),
        Series::new("Monthly Income".into(), &[5000.0f64, 6000.0]).into_column(),
        Series::new("Total Debt".into(), &[2000.0f64, 100.0]).into_column(),
        Series::new("Credit Utilization".into(), &[0.3f64, 0.1]).into_column(),
        Series::new("Missed Payments".into(), &[0i64, 1]).into_column(),
        Series::new("Credit Lines".into(), &[3i64, 2]).into_column(),
    ])
    .unwrap();
    let err = ScoringPipeline::new(&ShortModel)
        .score(&upload, &label_mapping())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "an error occurred during inference: model returned 1 probabilities for 2 rows"
    );
}

#[test]
fn out_of_range_probability_is_rejected() {
    let err = score_with(&FixedModel {
        probability: 1.5,
        label: 1,
    })
    .unwrap_err();
    assert!(matches!(err, ScoringError::Inference { .. }));
}

#[test]
fn non_numeric_upload_is_inference_error() {
    let mut upload = single_borrower();
    upload
        .with_column(Series::new("Age".into(), &["thirty"]).into_column())
        .unwrap();
    let model = FixedModel {
        probability: 0.5,
        label: 0,
    };
    let err = ScoringPipeline::new(&model)
        .score(&upload, &label_mapping())
        .unwrap_err();
    assert!(err.to_string().contains("column Age has a non-numeric value at row 0"));
}

#[test]
fn rescoring_is_idempotent() {
    let model = LoadedModel::bundled().unwrap();
    let pipeline = ScoringPipeline::new(&model);
    let first = pipeline.score(&single_borrower(), &label_mapping()).unwrap();
    let second = pipeline.score(&single_borrower(), &label_mapping()).unwrap();
    assert_eq!(first.records(), second.records());
    assert!(first.frame().equals(second.frame()));
}

#[test]
fn category_counts_include_empty_bands() {
    let scored = score_with(&FixedModel {
        probability: 0.1,
        label: 0,
    })
    .unwrap();
    let counts = scored.category_counts();
    assert_eq!(counts[&RiskCategory::Low], 1);
    assert_eq!(counts[&RiskCategory::Medium], 0);
    assert_eq!(counts[&RiskCategory::High], 0);
}

#[test]
fn header_only_frame_scores_to_no_rows() {
    let frame = DataFrame::new(
        BorrowerField::ALL
            .iter()
            .map(|field| Series::new(field.label().into(), Vec::<String>::new()).into_column())
            .collect(),
    )
    .unwrap();
    let scored = ScoringPipeline::new(&FixedModel {
        probability: 0.9,
        label: 1,
    })
    .score(&frame, &label_mapping())
    .unwrap();

    assert!(scored.is_empty());
    assert_eq!(scored.rounded_probabilities().count(), 0);
    assert!(scored.category_counts().values().all(|&count| count == 0));
    assert_eq!(scored.frame().height(), 0);
    assert!(scored.frame().column(PREDICTED_PROB_COLUMN).is_ok());
}

proptest! {
    #[test]
    fn rounding_stays_within_half_a_cent(p in 0.0f64..=1.0) {
        let rounded = round_probability(p);
        prop_assert!((rounded - p).abs() <= 0.005 + 1e-12);
        prop_assert!((0.0..=1.0).contains(&rounded));
    }

    #[test]
    fn rounding_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(round_probability(lo) <= round_probability(hi));
    }
}
