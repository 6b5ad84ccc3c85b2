/// Ratios below this are treated as 1 so a bogus ratio never divides by zero.
pub const MIN_DIVINE_RATIO: f64 = 1.0;

/// Divine-denominated price for a listing.
///
/// An explicit non-zero divine value wins. Otherwise the chaos value is
/// converted with `ratio` (divine-to-chaos), floored at [`MIN_DIVINE_RATIO`].
pub fn divine_value(chaos: f64, explicit_divine: Option<f64>, ratio: f64) -> f64 {
    match explicit_divine {
        Some(divine) if divine != 0.0 => divine,
        _ => chaos / floor_ratio(ratio),
    }
}

fn floor_ratio(ratio: f64) -> f64 {
    // NaN fails the comparison and falls back to the floor as well
    if ratio >= MIN_DIVINE_RATIO {
        ratio
    } else {
        MIN_DIVINE_RATIO
    }
}

/// First present, non-zero number, else zero.
pub fn first_nonzero(values: &[Option<f64>]) -> f64 {
    values
        .iter()
        .flatten()
        .copied()
        .find(|v| *v != 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_divine_wins() {
        assert_eq!(divine_value(300.0, Some(2.5), 150.0), 2.5);
    }

    #[test]
    fn test_divine_from_ratio() {
        assert_eq!(divine_value(300.0, None, 150.0), 2.0);
        assert_eq!(divine_value(300.0, Some(0.0), 150.0), 2.0);
    }

    #[test]
    fn test_ratio_floored_at_one() {
        assert_eq!(divine_value(42.0, None, 0.0), 42.0);
        assert_eq!(divine_value(42.0, None, 0.25), 42.0);
        assert_eq!(divine_value(42.0, None, -10.0), 42.0);
        assert_eq!(divine_value(42.0, None, f64::NAN), 42.0);
    }

    #[test]
    fn test_first_nonzero() {
        assert_eq!(first_nonzero(&[None, Some(0.0), Some(12.5), Some(3.0)]), 12.5);
        assert_eq!(first_nonzero(&[None, Some(0.0)]), 0.0);
        assert_eq!(first_nonzero(&[]), 0.0);
    }
}
