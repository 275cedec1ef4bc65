//! Display formatting for market figures.

/// Formats a dollar amount rounded to whole units with thousands separators.
///
/// Rounds half away from zero. Non-finite input renders as `$0`, negative
/// amounts as `-$1,234`.
///
/// # Example
///
/// ```
/// use coinboard_lib::format::format_currency;
///
/// assert_eq!(format_currency(1234567.5), "$1,234,568");
/// assert_eq!(format_currency(999.4), "$999");
/// ```
pub fn format_currency(n: f64) -> String {
    if !n.is_finite() {
        return "$0".to_string();
    }

    let rounded = n.round();
    // -0.4 rounds to -0.0
    if rounded == 0.0 {
        return "$0".to_string();
    }

    let grouped = group_thousands(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Inserts `,` every three digits counting from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Direction of a percent change, used to pick the display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Zero or positive.
    Up,
    /// Strictly negative after rounding.
    Down,
}

/// A formatted percent change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Percent {
    /// Display text, e.g. `-1.23%`.
    pub text: String,
    /// Whether the value is negative after rounding to two decimals.
    pub is_negative: bool,
}

impl Percent {
    /// Returns the styling direction.
    pub fn trend(&self) -> Trend {
        if self.is_negative { Trend::Down } else { Trend::Up }
    }
}

/// Text shown when a record has no 24h change.
pub const MISSING_PERCENT: &str = "N/A";

/// Formats a percent change with two decimals and a trailing `%`.
///
/// Values that round to zero display as `0.00%` and count as non-negative.
/// Absent, NaN, or infinite input displays as `N/A`.
pub fn format_percent(n: Option<f64>) -> Percent {
    let Some(value) = n.filter(|v| v.is_finite()) else {
        return Percent {
            text: MISSING_PERCENT.to_string(),
            is_negative: false,
        };
    };

    // Ties round away from zero, matching `format_currency`
    let scaled = value.abs() * 100.0;
    let magnitude = if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value.abs()
    };
    let is_negative = value < 0.0 && magnitude != 0.0;

    let mut text = format!("{:.2}", magnitude);
    if is_negative {
        text.insert(0, '-');
    }
    text.push('%');

    Percent { text, is_negative }
}

/// Uppercases a ticker symbol.
pub fn format_symbol(s: &str) -> String {
    s.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks `^\$\d{1,3}(,\d{3})*$`.
    fn is_grouped_currency(s: &str) -> bool {
        let Some(body) = s.strip_prefix('$') else {
            return false;
        };
        let groups: Vec<&str> = body.split(',').collect();
        let first = groups[0];
        if first.is_empty() || first.len() > 3 || !first.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        groups[1..]
            .iter()
            .all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
    }

    #[test]
    fn test_currency_shape_and_value() {
        let samples = [
            0.0, 0.49, 0.5, 1.0, 12.0, 999.5, 1000.0, 12345.678, 999999.5, 1234567.0,
            64123.51, 1262000000000.0, 31000000000.4, 123456789012345.0,
        ];
        for n in samples {
            let text = format_currency(n);
            assert!(is_grouped_currency(&text), "{n} formatted as {text}");
            let parsed: f64 = text[1..].replace(',', "").parse().unwrap();
            assert_eq!(parsed, n.round(), "{n} formatted as {text}");
        }
    }

    #[test]
    fn test_currency_examples() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(1234567.5), "$1,234,568");
        assert_eq!(format_currency(0.5), "$1");
    }

    #[test]
    fn test_currency_edge_inputs() {
        assert_eq!(format_currency(f64::NAN), "$0");
        assert_eq!(format_currency(f64::INFINITY), "$0");
        assert_eq!(format_currency(-0.4), "$0");
        assert_eq!(format_currency(-1234.0), "-$1,234");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(format_percent(Some(3.456)).text, "3.46%");
        assert_eq!(format_percent(Some(4.2)).text, "4.20%");
        assert_eq!(format_percent(Some(-1.5)).text, "-1.50%");
        assert_eq!(format_percent(Some(12.0)).text, "12.00%");
    }

    #[test]
    fn test_percent_ties_round_away_from_zero() {
        assert_eq!(format_percent(Some(0.125)).text, "0.13%");
        assert_eq!(format_percent(Some(0.625)).text, "0.63%");

        let down = format_percent(Some(-0.125));
        assert_eq!(down.text, "-0.13%");
        assert!(down.is_negative);

        let tiny = format_percent(Some(-0.005));
        assert_eq!(tiny.text, "-0.01%");
        assert!(tiny.is_negative);
    }

    #[test]
    fn test_percent_two_decimals() {
        for n in [0.0, 1.0, -1.0, 0.123, -98.7654, 1500.1, 0.001] {
            let text = format_percent(Some(n)).text;
            let number = text.strip_suffix('%').unwrap();
            let (_, decimals) = number.split_once('.').unwrap();
            assert_eq!(decimals.len(), 2, "{n} formatted as {text}");
        }
    }

    #[test]
    fn test_percent_sign_styling() {
        assert!(format_percent(Some(-0.01)).is_negative);
        assert_eq!(format_percent(Some(-0.01)).trend(), Trend::Down);
        assert!(!format_percent(Some(0.0)).is_negative);
        assert!(!format_percent(Some(3.456)).is_negative);
        assert_eq!(format_percent(Some(0.0)).trend(), Trend::Up);
    }

    #[test]
    fn test_percent_negative_zero() {
        let p = format_percent(Some(-0.004));
        assert_eq!(p.text, "0.00%");
        assert!(!p.is_negative);
        assert_eq!(format_percent(Some(-0.0)).text, "0.00%");
    }

    #[test]
    fn test_percent_missing() {
        assert_eq!(format_percent(None).text, "N/A");
        assert!(!format_percent(None).is_negative);
        assert_eq!(format_percent(Some(f64::NAN)).text, "N/A");
    }

    #[test]
    fn test_symbol_uppercase() {
        assert_eq!(format_symbol("btc"), "BTC");
        assert_eq!(format_symbol("Eth"), "ETH");
        assert_eq!(format_symbol(""), "");
    }
}
