//! Numeric feature matrix passed across the model boundary.

use crate::field::{BorrowerField, FIELD_COUNT};

/// One borrower's features in canonical field order.
pub type FeatureRow = [f64; FIELD_COUNT];

/// Row-major matrix of borrower features, one row per uploaded record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<FeatureRow>,
}

impl FeatureMatrix {
    #[must_use]
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Values of a single field down all rows.
    pub fn column(&self, field: BorrowerField) -> impl Iterator<Item = f64> + '_ {
        let idx = field.index();
        self.rows.iter().map(move |row| row[idx])
    }
}

impl From<Vec<FeatureRow>> for FeatureMatrix {
    fn from(rows: Vec<FeatureRow>) -> Self {
        Self::new(rows)
    }
}
