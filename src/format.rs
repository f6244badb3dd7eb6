//! Display-boundary conversions for amounts stored as integer cents.

/// Format cents as an en-US dollar string, e.g. `123456` -> `"$1,234.56"`.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{fraction:02}")
}

/// Convert stored cents to decimal dollars for edit forms.
pub fn cents_to_dollars(cents: i32) -> f64 {
    f64::from(cents) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_formats_as_zero_dollars() {
        assert_eq!(format_currency(0), "$0.00");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(5), "$0.05");
        assert_eq!(format_currency(15795), "$157.95");
        assert_eq!(format_currency(100_000), "$1,000.00");
        assert_eq!(format_currency(123_456_789), "$1,234,567.89");
    }

    #[test]
    fn negative_amounts_keep_sign_before_symbol() {
        assert_eq!(format_currency(-500), "-$5.00");
        assert_eq!(format_currency(i64::MIN), "-$92,233,720,368,547,758.08");
    }

    #[test]
    fn cents_convert_to_dollars() {
        assert_eq!(cents_to_dollars(15795), 157.95);
        assert_eq!(cents_to_dollars(0), 0.0);
    }
}
