//! User selections of source columns.

use crate::error::MappingError;
use crate::field::{BorrowerField, FIELD_COUNT};

/// Source column chosen for one field, or no choice yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnSelection {
    Selected(String),
    #[default]
    Unselected,
}

impl ColumnSelection {
    pub fn selected(column: impl Into<String>) -> Self {
        Self::Selected(column.into())
    }

    #[must_use]
    pub fn as_selected(&self) -> Option<&str> {
        match self {
            Self::Selected(column) => Some(column.as_str()),
            Self::Unselected => None,
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }
}

impl From<Option<String>> for ColumnSelection {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Unselected, Self::Selected)
    }
}

/// One selection per borrower field, indexed in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    selections: [ColumnSelection; FIELD_COUNT],
}

impl ColumnMapping {
    /// A mapping with every field unselected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every field to the column carrying its canonical name.
    #[must_use]
    pub fn identity() -> Self {
        let mut mapping = Self::new();
        for field in BorrowerField::ALL {
            mapping.select(field, field.canonical_name());
        }
        mapping
    }

    #[must_use]
    pub fn with(mut self, field: BorrowerField, column: impl Into<String>) -> Self {
        self.select(field, column);
        self
    }

    pub fn select(&mut self, field: BorrowerField, column: impl Into<String>) {
        self.selections[field.index()] = ColumnSelection::Selected(column.into());
    }

    pub fn set(&mut self, field: BorrowerField, selection: ColumnSelection) {
        self.selections[field.index()] = selection;
    }

    pub fn clear(&mut self, field: BorrowerField) {
        self.selections[field.index()] = ColumnSelection::Unselected;
    }

    #[must_use]
    pub fn get(&self, field: BorrowerField) -> &ColumnSelection {
        &self.selections[field.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BorrowerField, &ColumnSelection)> {
        BorrowerField::ALL
            .into_iter()
            .zip(self.selections.iter())
    }

    /// Overlays every selected entry of `other` onto this mapping.
    pub fn overlay(&mut self, other: &ColumnMapping) {
        for (field, selection) in other.iter() {
            if selection.is_selected() {
                self.set(field, selection.clone());
            }
        }
    }

    #[must_use]
    pub fn unselected_fields(&self) -> Vec<BorrowerField> {
        self.iter()
            .filter(|(_, selection)| !selection.is_selected())
            .map(|(field, _)| field)
            .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.selections.iter().all(ColumnSelection::is_selected)
    }

    /// Returns the selected column names in canonical order.
    ///
    /// # Errors
    ///
    /// [`MappingError::Incomplete`] when any field is unselected.
    pub fn resolve(&self) -> Result<[&str; FIELD_COUNT], MappingError> {
        let missing = self.unselected_fields();
        if !missing.is_empty() {
            return Err(MappingError::Incomplete { fields: missing });
        }
        let mut columns = [""; FIELD_COUNT];
        for (slot, selection) in columns.iter_mut().zip(self.selections.iter()) {
            if let Some(column) = selection.as_selected() {
                *slot = column;
            }
        }
        Ok(columns)
    }
}
