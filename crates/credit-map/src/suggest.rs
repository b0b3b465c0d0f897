//! Fuzzy mapping suggestions.
//!
//! Suggestions are advisory: they never change a selection the user made, and
//! only fill unselected fields when explicitly applied.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use tracing::debug;

use credit_model::{BorrowerField, ColumnMapping, normalize_field_name};

use crate::hints::ColumnHint;

/// Multiplier applied when a column's values are mostly non-numeric.
const NON_NUMERIC_PENALTY: f64 = 0.7;

/// Confidence level categories for mapping quality assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// Uncertain; requires manual verification.
    Low,
    /// Reasonable but should be reviewed.
    Medium,
    /// Near-certain.
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Configurable thresholds for categorizing mapping confidence.
///
/// - Below `low`: rejected (not included in results)
/// - `low` to `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - At or above `high`: [`ConfidenceLevel::High`]
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    pub high: f32,
    pub medium: f32,
    pub low: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: 0.80,
            low: 0.60,
        }
    }
}

impl ConfidenceThresholds {
    /// Returns `None` if the score is below the low threshold.
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappingSuggestion {
    pub field: BorrowerField,
    pub column: String,
    pub confidence: f32,
    pub level: ConfidenceLevel,
}

/// Output of [`SuggestionEngine::suggest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingSuggestions {
    /// At most one suggestion per field, in canonical field order.
    pub suggestions: Vec<MappingSuggestion>,
    /// Upload columns not suggested for any field.
    pub unmapped_columns: Vec<String>,
}

impl MappingSuggestions {
    #[must_use]
    pub fn get(&self, field: BorrowerField) -> Option<&MappingSuggestion> {
        self.suggestions.iter().find(|s| s.field == field)
    }

    /// Fills unselected fields of `mapping` with suggestions at or above `min_level`.
    ///
    /// Columns the user already selected are never suggested a second time.
    /// Returns the fields that were filled.
    pub fn apply_to(
        &self,
        mapping: &mut ColumnMapping,
        min_level: ConfidenceLevel,
    ) -> Vec<BorrowerField> {
        let used: BTreeSet<String> = mapping
            .iter()
            .filter_map(|(_, selection)| selection.as_selected().map(str::to_string))
            .collect();
        let mut filled = Vec::new();
        for suggestion in &self.suggestions {
            if suggestion.level < min_level
                || mapping.get(suggestion.field).is_selected()
                || used.contains(&suggestion.column)
            {
                continue;
            }
            mapping.select(suggestion.field, suggestion.column.clone());
            filled.push(suggestion.field);
        }
        filled
    }
}

struct Candidate<'a> {
    column: &'a str,
    field: BorrowerField,
    confidence: f32,
}

/// Matches upload column names against the borrower fields.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    thresholds: ConfidenceThresholds,
    column_hints: BTreeMap<String, ColumnHint>,
}

impl SuggestionEngine {
    #[must_use]
    pub fn new(thresholds: ConfidenceThresholds) -> Self {
        Self {
            thresholds,
            column_hints: BTreeMap::new(),
        }
    }

    /// Attaches column hints; non-numeric columns are penalized.
    #[must_use]
    pub fn with_hints(mut self, column_hints: BTreeMap<String, ColumnHint>) -> Self {
        self.column_hints = column_hints;
        self
    }

    /// One-to-one suggestion: each column goes to at most one field and each
    /// field gets at most one column, best confidence first.
    #[must_use]
    pub fn suggest(&self, columns: &[String]) -> MappingSuggestions {
        let mut candidates: Vec<Candidate<'_>> = Vec::new();
        for column in columns {
            for field in BorrowerField::ALL {
                candidates.push(Candidate {
                    column: column.as_str(),
                    field,
                    confidence: self.score_candidate(column, field),
                });
            }
        }
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.field.cmp(&b.field))
        });

        let mut assigned_fields = BTreeSet::new();
        let mut assigned_columns = BTreeSet::new();
        let mut suggestions = Vec::new();
        for candidate in candidates {
            let Some(level) = self.thresholds.categorize(candidate.confidence) else {
                break;
            };
            if assigned_fields.contains(&candidate.field)
                || assigned_columns.contains(candidate.column)
            {
                continue;
            }
            assigned_fields.insert(candidate.field);
            assigned_columns.insert(candidate.column);
            debug!(
                field = %candidate.field,
                column = %candidate.column,
                confidence = candidate.confidence,
                "mapping suggested"
            );
            suggestions.push(MappingSuggestion {
                field: candidate.field,
                column: candidate.column.to_string(),
                confidence: candidate.confidence,
                level,
            });
        }
        suggestions.sort_by_key(|s| s.field);

        let unmapped_columns = columns
            .iter()
            .filter(|column| !assigned_columns.contains(column.as_str()))
            .cloned()
            .collect();
        MappingSuggestions {
            suggestions,
            unmapped_columns,
        }
    }

    fn score_candidate(&self, column: &str, field: BorrowerField) -> f32 {
        let normalized = normalize_field_name(column);
        let targets = std::iter::once(field.canonical_name())
            .chain(std::iter::once(field.label()))
            .chain(field.synonyms().iter().copied())
            .map(normalize_field_name);

        let mut score = 0.0f64;
        for target in targets {
            if normalized == target {
                score = 1.0;
                break;
            }
            score = score.max(jaro_similarity(normalized.chars(), target.chars()));
        }

        if let Some(hint) = self.column_hints.get(column)
            && hint.is_numeric == Some(false)
        {
            score *= NON_NUMERIC_PENALTY;
        }
        score as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_boundaries() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.categorize(0.95), Some(ConfidenceLevel::High));
        assert_eq!(thresholds.categorize(0.80), Some(ConfidenceLevel::Medium));
        assert_eq!(thresholds.categorize(0.60), Some(ConfidenceLevel::Low));
        assert_eq!(thresholds.categorize(0.59), None);
    }

    #[test]
    fn exact_label_scores_one() {
        let engine = SuggestionEngine::default();
        assert_eq!(
            engine.score_candidate("Monthly Income", BorrowerField::MonthlyIncome),
            1.0
        );
        assert_eq!(
            engine.score_candidate("late_payments", BorrowerField::MissedPayments),
            1.0
        );
    }
}
