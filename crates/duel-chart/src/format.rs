//! Label formatting.
//!
//! Bar labels use compact suffixes for large magnitudes; axis labels always
//! use one decimal place.

/// Formats a bar value.
///
/// - `|v| >= 1,000,000` renders as `X.XM`
/// - `|v| >= 1,000` renders as `X.XK`
/// - integral values render without decimals
/// - everything else renders with two decimals
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Formats a gridline value.
pub fn format_axis(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_examples() {
        assert_eq!(format_value(1_500_000.0), "1.5M");
        assert_eq!(format_value(2_500.0), "2.5K");
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(3.14159), "3.14");
    }

    #[test]
    fn test_format_value_boundaries() {
        assert_eq!(format_value(1_000_000.0), "1.0M");
        assert_eq!(format_value(999_999.0), "1000.0K");
        assert_eq!(format_value(1_000.0), "1.0K");
        assert_eq!(format_value(999.5), "999.50");
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn test_format_value_negative() {
        assert_eq!(format_value(-5.0), "-5");
        assert_eq!(format_value(-12.346), "-12.35");
        assert_eq!(format_value(-2_500.0), "-2.5K");
    }

    #[test]
    fn test_format_axis() {
        assert_eq!(format_axis(0.0), "0.0");
        assert_eq!(format_axis(21.86), "21.9");
        assert_eq!(format_axis(115.0), "115.0");
    }
}
