//! Scoring session state machine.
//!
//! `Idle -> FileUploaded -> ColumnsMapped -> Scored`. A failed scoring
//! attempt falls back to `ColumnsMapped` with the message kept for display
//! and no results.

use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use credit_ingest::UploadedTable;
use credit_model::{BorrowerField, ColumnMapping, ColumnSelection, CreditModel};
use credit_score::{ScoredFrame, ScoringError, ScoringPipeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    Idle,
    FileUploaded,
    ColumnsMapped,
    Scored,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::FileUploaded => "file uploaded",
            Self::ColumnsMapped => "columns mapped",
            Self::Scored => "scored",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no file has been uploaded")]
    NoUpload,

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// One user's pass through upload, mapping and scoring.
pub struct ScoringSession<'m> {
    model: &'m dyn CreditModel,
    upload: Option<UploadedTable>,
    mapping: ColumnMapping,
    scored: Option<ScoredFrame>,
    last_error: Option<String>,
    state: SessionState,
}

impl<'m> ScoringSession<'m> {
    #[must_use]
    pub fn new(model: &'m dyn CreditModel) -> Self {
        Self {
            model,
            upload: None,
            mapping: ColumnMapping::new(),
            scored: None,
            last_error: None,
            state: SessionState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn upload_table(&self) -> Option<&UploadedTable> {
        self.upload.as_ref()
    }

    #[must_use]
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Results of the last successful scoring run.
    #[must_use]
    pub fn scored(&self) -> Option<&ScoredFrame> {
        self.scored.as_ref()
    }

    /// Message from the last failed scoring run, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replaces the upload; all selections and results are reset.
    pub fn upload(&mut self, table: UploadedTable) {
        self.upload = Some(table);
        self.mapping = ColumnMapping::new();
        self.scored = None;
        self.last_error = None;
        self.transition(SessionState::FileUploaded);
    }

    /// Changes one selection. Results from an earlier run are discarded.
    pub fn select(
        &mut self,
        field: BorrowerField,
        selection: ColumnSelection,
    ) -> Result<(), SessionError> {
        if self.upload.is_none() {
            return Err(SessionError::NoUpload);
        }
        self.mapping.set(field, selection);
        self.refresh_mapping_state();
        Ok(())
    }

    /// Replaces every selection at once.
    pub fn set_mapping(&mut self, mapping: ColumnMapping) -> Result<(), SessionError> {
        if self.upload.is_none() {
            return Err(SessionError::NoUpload);
        }
        self.mapping = mapping;
        self.refresh_mapping_state();
        Ok(())
    }

    /// Runs the pipeline over the whole upload.
    ///
    /// On failure the session returns to `ColumnsMapped` (or stays at
    /// `FileUploaded` if selections are incomplete) with no results.
    pub fn score(&mut self) -> Result<&ScoredFrame, SessionError> {
        let Some(upload) = &self.upload else {
            return Err(SessionError::NoUpload);
        };
        let result = ScoringPipeline::new(self.model).score(upload.frame(), &self.mapping);
        match result {
            Ok(scored) => {
                self.last_error = None;
                self.transition(SessionState::Scored);
                Ok(self.scored.insert(scored))
            }
            Err(error) => {
                warn!(%error, "scoring failed");
                self.last_error = Some(error.to_string());
                self.scored = None;
                self.refresh_mapping_state();
                Err(error.into())
            }
        }
    }

    fn refresh_mapping_state(&mut self) {
        self.scored = None;
        let next = if self.mapping.is_complete() {
            SessionState::ColumnsMapped
        } else {
            SessionState::FileUploaded
        };
        self.transition(next);
    }

    fn transition(&mut self, next: SessionState) {
        if next != self.state {
            debug!(from = %self.state, to = %next, "session state changed");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

    use credit_model::{FeatureMatrix, MappingError, ModelError};

    use super::*;

    struct HalfModel;

    impl CreditModel for HalfModel {
        fn predict_probability(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
            Ok(vec![0.5; features.len()])
        }

        fn predict_label(&self, features: &FeatureMatrix) -> Result<Vec<u8>, ModelError> {
            Ok(vec![1; features.len()])
        }
    }

    fn upload() -> UploadedTable {
        let frame = DataFrame::new(
            BorrowerField::ALL
                .iter()
                .map(|field| Series::new(field.label().into(), &[1.0f64, 2.0]).into_column())
                .chain(std::iter::once(
                    Series::new("comment".into(), &["ok", "n/a"]).into_column(),
                ))
                .collect(),
        )
        .unwrap();
        UploadedTable::from_frame("borrowers.csv", frame)
    }

    fn label_mapping() -> ColumnMapping {
        BorrowerField::ALL
            .into_iter()
            .fold(ColumnMapping::new(), |mapping, field| {
                mapping.with(field, field.label())
            })
    }

    #[test]
    fn happy_path_walks_every_state() {
        let mut session = ScoringSession::new(&HalfModel);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.upload_table().is_none());
        session.upload(upload());
        assert_eq!(session.state(), SessionState::FileUploaded);
        assert_eq!(session.upload_table().map(UploadedTable::row_count), Some(2));
        session.set_mapping(label_mapping()).unwrap();
        assert_eq!(session.state(), SessionState::ColumnsMapped);
        assert_eq!(session.score().unwrap().len(), 2);
        assert_eq!(session.state(), SessionState::Scored);
    }

    #[test]
    fn partial_selection_stays_uploaded() {
        let mut session = ScoringSession::new(&HalfModel);
        session.upload(upload());
        session
            .select(BorrowerField::Age, ColumnSelection::selected("Age"))
            .unwrap();
        assert_eq!(session.state(), SessionState::FileUploaded);

        let err = session.score().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Scoring(ScoringError::Mapping(MappingError::Incomplete { .. }))
        ));
        assert_eq!(session.state(), SessionState::FileUploaded);
        assert!(session.scored().is_none());
    }

    #[test]
    fn failed_scoring_falls_back_to_mapped() {
        let mut session = ScoringSession::new(&HalfModel);
        session.upload(upload());
        session.set_mapping(label_mapping()).unwrap();
        session.score().unwrap();

        session
            .select(BorrowerField::Age, ColumnSelection::selected("comment"))
            .unwrap();
        assert_eq!(session.state(), SessionState::ColumnsMapped);
        assert!(session.scored().is_none());

        assert!(session.score().is_err());
        assert_eq!(session.state(), SessionState::ColumnsMapped);
        assert!(session.scored().is_none());
        assert!(
            session
                .last_error()
                .unwrap()
                .starts_with("an error occurred during inference")
        );
    }

    #[test]
    fn selecting_before_upload_is_rejected() {
        let mut session = ScoringSession::new(&HalfModel);
        assert!(matches!(
            session.select(BorrowerField::Age, ColumnSelection::selected("Age")),
            Err(SessionError::NoUpload)
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn new_upload_resets_selections() {
        let mut session = ScoringSession::new(&HalfModel);
        session.upload(upload());
        session.set_mapping(label_mapping()).unwrap();
        session.upload(upload());
        assert_eq!(session.state(), SessionState::FileUploaded);
        assert!(!session.mapping().is_complete());
    }
}
