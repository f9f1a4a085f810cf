//! Handicap index calculation.
//!
//! Each round yields a handicap differential normalised to a standard
//! slope rating, and the index is the mean differential across the
//! full history, rounded to one decimal place.

use crate::round::Round;

/// Slope rating of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;

/// Handicap differential for a single round.
///
/// `(score - course rating) * 113 / slope rating`. The slope rating
/// must be non-zero, which holds for every stored round.
#[must_use]
pub fn differential(round: &Round) -> f64 {
    (f64::from(round.score) - round.course_rating) * STANDARD_SLOPE
        / f64::from(round.slope_rating)
}

/// Handicap index over a round history.
///
/// The mean of all differentials, rounded to one decimal place with
/// ties away from zero. An empty history yields 0.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn handicap_index(rounds: &[Round]) -> f64 {
    if rounds.is_empty() {
        return 0.0;
    }
    let total: f64 = rounds.iter().map(differential).sum();
    let mean = total / rounds.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::RoundId;
    use chrono::Utc;

    fn round(score: i32, course_rating: f64, slope_rating: i32) -> Round {
        Round {
            id: RoundId(1),
            score,
            course_rating,
            slope_rating,
            played_at: Utc::now(),
        }
    }

    #[test]
    fn test_differential_at_standard_slope() {
        let diff = differential(&round(90, 72.0, 113));
        assert!((diff - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_differential_scales_with_slope() {
        let diff = differential(&round(85, 70.0, 120));
        assert!((diff - 14.125).abs() < 1e-9);
    }

    #[test]
    fn test_differential_can_be_negative() {
        let diff = differential(&round(70, 72.0, 113));
        assert!((diff + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_index_of_empty_history_is_zero() {
        assert!((handicap_index(&[]) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_index_averages_and_rounds() {
        // Differentials 18.0 and 14.125, mean 16.0625, rounded 16.1.
        let rounds = vec![round(90, 72.0, 113), round(85, 70.0, 120)];
        assert!((handicap_index(&rounds) - 16.1).abs() < 1e-9);
    }

    #[test]
    fn test_index_rounds_ties_away_from_zero() {
        // Single differential of exactly 16.25 rounds up to 16.3.
        let rounds = vec![round(88, 71.75, 113)];
        assert!((handicap_index(&rounds) - 16.3).abs() < 1e-9);
    }
}
