/// Rounds to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Composite 0-20 style score for a trade partner.
///
/// Value contributes up to 10 points (one per 50 units), year-over-year growth
/// up to ±5 (growth expressed as a fraction, times 10), and share of total up
/// to 5 (one point per 2 percentage points). Rounded to one decimal.
pub fn performance_score(value: f64, growth_yoy: f64, share_of_total: f64) -> f64 {
    let value_score = (value / 50.0).min(10.0);
    let growth_score = (growth_yoy * 10.0).clamp(-5.0, 5.0);
    let share_score = (share_of_total / 2.0).min(5.0);
    round_to(value_score + growth_score + share_score, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_components_at_their_caps() {
        assert_eq!(performance_score(500.0, 1.0, 10.0), 20.0);
        assert_eq!(performance_score(10_000.0, 3.0, 80.0), 20.0);
    }

    #[test]
    fn test_value_component_is_linear_below_cap() {
        assert_eq!(performance_score(50.0, 1.0, 10.0), 11.0);
        assert_eq!(performance_score(125.0, 0.0, 0.0), 2.5);
    }

    #[test]
    fn test_negative_growth_is_floored() {
        assert_eq!(performance_score(0.0, -2.0, 0.0), -5.0);
        assert_eq!(performance_score(100.0, -0.12, 3.0), 2.3);
    }

    #[test]
    fn test_result_is_rounded_to_one_decimal() {
        assert_eq!(performance_score(33.0, 0.0, 0.0), 0.7);
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(-0.04, 1), -0.0);
    }
}
