/// Formats a dollar amount with a magnitude suffix: `$1.23B`, `$4.5M`,
/// `$6.7K`, `$8.9`. Negative amounts keep their sign in front: `-$50.0M`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.0".to_string();
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    let body = if abs >= 1e9 {
        format!("${:.2}B", abs / 1e9)
    } else if abs >= 1e6 {
        format!("${:.1}M", abs / 1e6)
    } else if abs >= 1e3 {
        format!("${:.1}K", abs / 1e3)
    } else {
        format!("${abs:.1}")
    };
    format!("{sign}{body}")
}

/// Model values are in US$ millions.
pub fn format_millions(millions: f64) -> String {
    format_currency(millions * 1e6)
}

pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", if percent.is_finite() { percent } else { 0.0 })
}

/// A percentage change with an explicit sign, e.g. `+3.2%`.
pub fn format_change(percent: f64) -> String {
    format!("{:+.1}%", if percent.is_finite() { percent } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_thresholds() {
        assert_eq!(format_currency(1_234_000_000.0), "$1.23B");
        assert_eq!(format_currency(4_500_000.0), "$4.5M");
        assert_eq!(format_currency(6_700.0), "$6.7K");
        assert_eq!(format_currency(8.9), "$8.9");
        assert_eq!(format_currency(1e9), "$1.00B");
        assert_eq!(format_currency(999.9), "$999.9");
    }

    #[test]
    fn test_negative_and_non_finite_currency() {
        assert_eq!(format_currency(-50_000_000.0), "-$50.0M");
        assert_eq!(format_currency(f64::NAN), "$0.0");
    }

    #[test]
    fn test_millions_scale() {
        assert_eq!(format_millions(677.6), "$677.6M");
        assert_eq!(format_millions(1627.3), "$1.63B");
    }

    #[test]
    fn test_percent_formats() {
        assert_eq!(format_percent(63.64), "63.6%");
        assert_eq!(format_change(3.2), "+3.2%");
        assert_eq!(format_change(-1.0), "-1.0%");
    }
}
