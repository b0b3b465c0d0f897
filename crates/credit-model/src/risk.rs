//! Ordinal risk bands derived from default probability.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest probability that is no longer [`RiskCategory::Low`].
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;
/// Lowest probability that is [`RiskCategory::High`].
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buckets a default probability into a risk band.
///
/// Bands are half-open on the lower bound: `0.4` is `Medium` and `0.7` is `High`.
/// Callers pass the unrounded probability.
#[must_use]
pub fn classify(probability: f64) -> RiskCategory {
    if probability < MEDIUM_RISK_THRESHOLD {
        RiskCategory::Low
    } else if probability < HIGH_RISK_THRESHOLD {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_higher_band() {
        assert_eq!(classify(0.4), RiskCategory::Medium);
        assert_eq!(classify(0.7), RiskCategory::High);
        assert_eq!(classify(0.399_999), RiskCategory::Low);
        assert_eq!(classify(0.699_999), RiskCategory::Medium);
    }

    #[test]
    fn extremes() {
        assert_eq!(classify(0.0), RiskCategory::Low);
        assert_eq!(classify(1.0), RiskCategory::High);
    }

    #[test]
    fn categories_are_ordered() {
        assert!(RiskCategory::Low < RiskCategory::Medium);
        assert!(RiskCategory::Medium < RiskCategory::High);
    }
}
