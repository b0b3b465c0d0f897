/// Decimal places kept in `Predicted_Prob`.
pub const PROBABILITY_DECIMALS: i32 = 2;

/// Rounds a probability to two decimals for display.
///
/// Uses round-half-away-from-zero ([`f64::round`] on the scaled value), so
/// `0.125` becomes `0.13`. The value is only for display; risk bands are
/// assigned from the unrounded probability.
#[must_use]
pub fn round_probability(probability: f64) -> f64 {
    let scale = 10f64.powi(PROBABILITY_DECIMALS);
    (probability * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(round_probability(0.125), 0.13);
        assert_eq!(round_probability(0.375), 0.38);
    }

    #[test]
    fn keeps_two_decimals() {
        assert_eq!(round_probability(0.35), 0.35);
        assert_eq!(round_probability(0.3549), 0.35);
        assert_eq!(round_probability(0.0), 0.0);
        assert_eq!(round_probability(1.0), 1.0);
    }
}
