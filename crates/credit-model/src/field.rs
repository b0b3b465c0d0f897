use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;

/// Number of logical fields the model consumes.
pub const FIELD_COUNT: usize = 6;

/// Column holding actual outcomes, matched by exact name.
pub const GROUND_TRUTH_COLUMN: &str = "Defaulted";

/// One logical borrower attribute.
///
/// The declaration order is the canonical column order expected by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BorrowerField {
    #[serde(rename = "Age")]
    Age,
    #[serde(rename = "Monthly_Income")]
    MonthlyIncome,
    #[serde(rename = "Total_Debt")]
    TotalDebt,
    #[serde(rename = "Credit_Utilization")]
    CreditUtilization,
    #[serde(rename = "Missed_Payments")]
    MissedPayments,
    #[serde(rename = "Credit_Lines")]
    CreditLines,
}

impl BorrowerField {
    /// All fields in canonical order.
    pub const ALL: [BorrowerField; FIELD_COUNT] = [
        Self::Age,
        Self::MonthlyIncome,
        Self::TotalDebt,
        Self::CreditUtilization,
        Self::MissedPayments,
        Self::CreditLines,
    ];

    /// Position of the field in the canonical order.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used after mapping and at the model boundary.
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::MonthlyIncome => "Monthly_Income",
            Self::TotalDebt => "Total_Debt",
            Self::CreditUtilization => "Credit_Utilization",
            Self::MissedPayments => "Missed_Payments",
            Self::CreditLines => "Credit_Lines",
        }
    }

    /// Human-facing name, also the header used in the sample template.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::MonthlyIncome => "Monthly Income",
            Self::TotalDebt => "Total Debt",
            Self::CreditUtilization => "Credit Utilization",
            Self::MissedPayments => "Missed Payments",
            Self::CreditLines => "Credit Lines",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Age => "Age of the borrower in years (e.g. 21-65)",
            Self::MonthlyIncome => "Gross monthly income in dollars (e.g. 3000, 10000)",
            Self::TotalDebt => "Sum of all current outstanding debts (credit cards, loans, etc.)",
            Self::CreditUtilization => "Credit used / total credit limit (a ratio from 0.0 to 1.0)",
            Self::MissedPayments => "Number of missed or late payments in recent months",
            Self::CreditLines => "Total number of active credit lines/accounts",
        }
    }

    /// Alternate spellings seen in borrower exports, used for mapping suggestions.
    #[must_use]
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Age => &["age years", "borrower age", "applicant age"],
            Self::MonthlyIncome => &["income", "monthly salary", "salary", "gross income"],
            Self::TotalDebt => &["debt", "outstanding debt", "total liabilities", "liabilities"],
            Self::CreditUtilization => &["utilization", "util", "utilization ratio", "credit usage"],
            Self::MissedPayments => &["late payments", "delinquencies", "missed", "past due"],
            Self::CreditLines => &["open accounts", "accounts", "num credit lines", "lines"],
        }
    }
}

impl fmt::Display for BorrowerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Lowercases, then folds `_`, `-`, `.`, `/`, `\` and runs of whitespace into single spaces.
///
/// Shared by field-name parsing and column-name matching so both agree on
/// what counts as the same name.
#[must_use]
pub fn normalize_field_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for BorrowerField {
    type Err = MappingError;

    /// Accepts the canonical name or the label, ignoring case and separator differences.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_field_name(s);
        Self::ALL
            .into_iter()
            .find(|field| {
                normalize_field_name(field.canonical_name()) == wanted
                    || normalize_field_name(field.label()) == wanted
            })
            .ok_or_else(|| MappingError::UnknownField {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_index() {
        for (idx, field) in BorrowerField::ALL.iter().enumerate() {
            assert_eq!(field.index(), idx);
        }
    }

    #[test]
    fn parses_canonical_names_and_labels() {
        assert_eq!(
            "Monthly_Income".parse::<BorrowerField>().unwrap(),
            BorrowerField::MonthlyIncome
        );
        assert_eq!(
            "credit utilization".parse::<BorrowerField>().unwrap(),
            BorrowerField::CreditUtilization
        );
        assert_eq!(
            "missed-payments".parse::<BorrowerField>().unwrap(),
            BorrowerField::MissedPayments
        );
    }

    #[test]
    fn normalizes_separators_and_case() {
        assert_eq!(normalize_field_name("  Monthly_Income "), "monthly income");
        assert_eq!(normalize_field_name("credit-utilization.pct"), "credit utilization pct");
        assert_eq!(normalize_field_name("Missed   Payments"), "missed payments");
        assert_eq!(normalize_field_name("total/debt"), "total debt");
    }

    #[test]
    fn parses_every_separator_style() {
        for raw in ["credit.utilization", "Credit/Utilization", "credit\\utilization"] {
            assert_eq!(
                raw.parse::<BorrowerField>().unwrap(),
                BorrowerField::CreditUtilization,
                "{raw}"
            );
        }
    }

    #[test]
    fn rejects_unknown_field() {
        let err = "Zip Code".parse::<BorrowerField>().unwrap_err();
        assert_eq!(
            err,
            MappingError::UnknownField {
                name: "Zip Code".to_string()
            }
        );
    }
}
