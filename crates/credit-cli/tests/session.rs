//! End-to-end: template file through upload, mapping and scoring.

use credit_cli::session::{ScoringSession, SessionError, SessionState};
use credit_ingest::{UploadedTable, write_template_file};
use credit_map::{ConfidenceLevel, SuggestionEngine, build_column_hints};
use credit_model::{BorrowerField, ColumnMapping, LoadedModel, MappingError, RiskCategory};
use credit_report::{ScoreReport, Styling};
use credit_score::{ScoringError, round_probability};

fn template_upload(include_ground_truth: bool) -> (tempfile::TempDir, UploadedTable) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("borrowers.csv");
    write_template_file(&path, include_ground_truth).unwrap();
    let upload = UploadedTable::load(&path).unwrap();
    (dir, upload)
}

fn suggested_mapping(upload: &UploadedTable) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    SuggestionEngine::default()
        .with_hints(build_column_hints(upload.frame()))
        .suggest(&upload.columns())
        .apply_to(&mut mapping, ConfidenceLevel::Medium);
    mapping
}

#[test]
fn sample_template_scores_with_bundled_model() {
    let model = LoadedModel::bundled().unwrap();
    let (_dir, upload) = template_upload(true);
    let rows = upload.row_count();
    let mapping = suggested_mapping(&upload);
    assert!(mapping.is_complete());

    let mut session = ScoringSession::new(&model);
    session.upload(upload);
    session.set_mapping(mapping).unwrap();
    let scored = session.score().unwrap();
    assert_eq!(scored.len(), rows);
    for record in scored.records() {
        assert!((0.0..=1.0).contains(&record.probability));
        assert_eq!(record.rounded_probability, round_probability(record.probability));
    }
    let total: usize = scored.category_counts().values().sum();
    assert_eq!(total, rows);

    let report = ScoreReport::build(scored).unwrap();
    let matrix = report.confusion().expect("template carries Defaulted");
    assert_eq!(matrix.total() + matrix.skipped(), rows);
    let text = report.render(scored, Styling::Never).unwrap();
    assert!(text.contains("Confusion Matrix"));
    assert_eq!(session.state(), SessionState::Scored);
}

#[test]
fn template_without_outcomes_has_no_confusion_matrix() {
    let model = LoadedModel::bundled().unwrap();
    let (_dir, upload) = template_upload(false);
    let mapping = suggested_mapping(&upload);

    let mut session = ScoringSession::new(&model);
    session.upload(upload);
    session.set_mapping(mapping).unwrap();
    let scored = session.score().unwrap();
    let report = ScoreReport::build(scored).unwrap();
    assert!(report.confusion().is_none());
    assert!(
        scored
            .records()
            .iter()
            .all(|record| RiskCategory::ALL.contains(&record.risk))
    );
}

#[test]
fn unmapped_field_reports_which_one() {
    let model = LoadedModel::bundled().unwrap();
    let (_dir, upload) = template_upload(true);
    let mut mapping = suggested_mapping(&upload);
    mapping.clear(BorrowerField::TotalDebt);

    let mut session = ScoringSession::new(&model);
    session.upload(upload);
    session.set_mapping(mapping).unwrap();
    let err = session.score().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Scoring(ScoringError::Mapping(MappingError::Incomplete { .. }))
    ));
    assert_eq!(
        err.to_string(),
        "please map all fields before scoring (unmapped: Total Debt)"
    );
    assert!(session.scored().is_none());
}

#[test]
fn header_only_upload_scores_to_empty_results() {
    let model = LoadedModel::bundled().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("header_only.csv");
    std::fs::write(
        &path,
        "Age,Monthly Income,Total Debt,Credit Utilization,Missed Payments,Credit Lines\n",
    )
    .unwrap();
    let upload = UploadedTable::load(&path).unwrap();
    assert_eq!(upload.row_count(), 0);
    let mapping = suggested_mapping(&upload);
    assert!(mapping.is_complete());

    let mut session = ScoringSession::new(&model);
    session.upload(upload);
    session.set_mapping(mapping).unwrap();
    let scored = session.score().unwrap();
    assert!(scored.is_empty());
    assert!(scored.category_counts().values().all(|&count| count == 0));

    let report = ScoreReport::build(scored).unwrap();
    assert!(report.histogram().is_none());
    assert!(report.confusion().is_none());
    report.render(scored, Styling::Never).unwrap();
    assert_eq!(session.state(), SessionState::Scored);
}
