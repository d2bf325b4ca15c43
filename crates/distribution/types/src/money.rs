//! Minor-unit money helpers
//!
//! Amounts are carried as `i64` minor units (1 minor unit = 0.01 of the
//! currency). Fractional intermediate values are rounded to whole minor
//! units with ties going away from zero.

/// Round a fractional minor-unit value to the nearest whole minor unit,
/// ties away from zero.
pub fn round_minor(value: f64) -> i64 {
    value.round() as i64
}

/// Apply a percentage (0-100 scale) to an amount, rounding the product.
pub fn apply_percentage(amount_minor: i64, percentage: f64) -> i64 {
    round_minor(amount_minor as f64 * percentage / 100.0)
}

/// The share of `whole` that `part` represents, on a 0-100 scale.
///
/// Returns 0.0 when `whole` is zero so callers never divide by zero.
pub fn share_of(part_minor: i64, whole_minor: i64) -> f64 {
    if whole_minor == 0 {
        0.0
    } else {
        part_minor as f64 / whole_minor as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_ties_away_from_zero() {
        assert_eq!(round_minor(2.5), 3);
        assert_eq!(round_minor(-2.5), -3);
        assert_eq!(round_minor(2.4), 2);
        assert_eq!(round_minor(2.6), 3);
        assert_eq!(round_minor(0.0), 0);
    }

    #[test]
    fn applies_percentage() {
        assert_eq!(apply_percentage(50_000_000, 5.0), 2_500_000);
        assert_eq!(apply_percentage(50_000_000, 10.0), 5_000_000);
        assert_eq!(apply_percentage(100, 0.0), 0);
        // 333 * 0.105 = 34.965 -> 35
        assert_eq!(apply_percentage(333, 10.5), 35);
    }

    #[test]
    fn share_of_whole() {
        assert!((share_of(7_300_000, 36_500_000) - 20.0).abs() < 1e-9);
        assert_eq!(share_of(123, 0), 0.0);
    }
}
