//! Raw field parsing and numeric sanity checks
//!
//! Form fields arrive as whatever the collaborator holds: text typed into an
//! input, a number, or nothing at all. Every one of them is reduced to a
//! finite, non-negative `f64`. Anything that cannot be read that way counts
//! as "not filled in yet" and becomes `0.0`; it is never an error.

/// A raw form value that can be read as a number
pub trait RawField {
    /// Read the value, yielding `0.0` for anything empty, non-numeric,
    /// non-finite or negative
    fn field_value(&self) -> f64;
}

/// Sanitize a parsed number into the normalizer's domain
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse a text field, trimming surrounding whitespace first
pub fn parse_field(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().map(sanitize).unwrap_or(0.0)
}

impl RawField for str {
    fn field_value(&self) -> f64 {
        parse_field(self)
    }
}

impl RawField for String {
    fn field_value(&self) -> f64 {
        parse_field(self)
    }
}

impl RawField for f64 {
    fn field_value(&self) -> f64 {
        sanitize(*self)
    }
}

impl RawField for f32 {
    fn field_value(&self) -> f64 {
        sanitize(f64::from(*self))
    }
}

macro_rules! raw_field_for_int {
    ($($t:ty),*) => {
        $(
            impl RawField for $t {
                fn field_value(&self) -> f64 {
                    sanitize(*self as f64)
                }
            }
        )*
    };
}

raw_field_for_int!(i32, i64, u32, u64);

impl<T: RawField + ?Sized> RawField for &T {
    fn field_value(&self) -> f64 {
        (**self).field_value()
    }
}

impl<T: RawField> RawField for Option<T> {
    fn field_value(&self) -> f64 {
        self.as_ref().map_or(0.0, RawField::field_value)
    }
}

/// Read an age field as whole years
///
/// Fractional ages are truncated, so "0.5" is an incomplete age. A browser
/// form that passes the raw number straight into the formula would accept
/// "0.5" as a complete age; here only whole years count.
pub fn parse_age_years(raw: impl RawField) -> u32 {
    let years = raw.field_value().floor();
    if years >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        years as u32
    }
}

/// Whether a canonical mass/height value is usable in a formula
pub fn is_present(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("70", 70.0)]
    #[case(" 175.5 ", 175.5)]
    #[case("1e2", 100.0)]
    #[case("", 0.0)]
    #[case("   ", 0.0)]
    #[case("abc", 0.0)]
    #[case("12kg", 0.0)]
    #[case("-5", 0.0)]
    #[case("NaN", 0.0)]
    #[case("inf", 0.0)]
    fn test_parse_field(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_field(raw), expected);
    }

    #[test]
    fn test_numeric_fields() {
        assert_eq!(64.5f64.field_value(), 64.5);
        assert_eq!((-3.0f64).field_value(), 0.0);
        assert_eq!(f64::NAN.field_value(), 0.0);
        assert_eq!(28u32.field_value(), 28.0);
        assert_eq!((-28i32).field_value(), 0.0);
    }

    #[test]
    fn test_optional_fields() {
        let missing: Option<&str> = None;
        assert_eq!(missing.field_value(), 0.0);
        assert_eq!(Some("9").field_value(), 9.0);
        assert_eq!(Some(String::from("x")).field_value(), 0.0);
    }

    #[rstest]
    #[case("28", 28)]
    #[case("28.9", 28)]
    #[case("0.5", 0)]
    #[case("", 0)]
    #[case("-4", 0)]
    fn test_parse_age_years(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(parse_age_years(raw), expected);
    }

    #[test]
    fn test_is_present() {
        assert!(is_present(0.1));
        assert!(!is_present(0.0));
        assert!(!is_present(-1.0));
        assert!(!is_present(f64::INFINITY));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: any text parses to a finite, non-negative number
        #[test]
        fn prop_parse_never_negative(raw in ".*") {
            let value = parse_field(&raw);
            prop_assert!(value.is_finite());
            prop_assert!(value >= 0.0);
        }

        /// Property: positive numbers survive formatting and parsing
        #[test]
        fn prop_positive_numbers_pass_through(value in 0.001f64..10_000.0) {
            prop_assert_eq!(parse_field(&value.to_string()), value);
        }
    }
}
