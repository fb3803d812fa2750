//! Per-representation arithmetic, parsing and formatting.
//!
//! [`Numeric`] is the capability set a machine type needs to back a
//! [`Strategy`](crate::Strategy). Integer widths share one macro, the float
//! pair another; the big integer and the decimal have their own impls.

use std::str::FromStr;

use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::culture::Culture;
use crate::kind::NumberKind;
use crate::number::Number;

/// A machine representation usable behind a numeric field.
pub trait Numeric: Clone + PartialOrd + std::fmt::Debug {
    /// The tag of this representation.
    const KIND: NumberKind;

    /// Smallest representable value, `None` when unbounded.
    fn natural_min() -> Option<Self>;

    /// Largest representable value, `None` when unbounded.
    fn natural_max() -> Option<Self>;

    /// Step used when none (or an unparsable one) is declared.
    fn default_step() -> Self;

    fn is_negative(&self) -> bool;

    /// Parse trimmed, non-empty text written in `culture`.
    fn parse(text: &str, culture: &Culture) -> Option<Self>;

    /// Render in `culture`, without digit grouping.
    fn format(&self, culture: &Culture) -> String;

    /// `self + step`, `None` when the result is not representable.
    fn step_up(&self, step: &Self) -> Option<Self>;

    /// `self - step`, `None` when the result is not representable.
    fn step_down(&self, step: &Self) -> Option<Self>;

    fn into_number(self) -> Number;
}

// =============================================================================
// Text Normalization
// =============================================================================

/// Split an optional leading sign off `text`.
fn split_sign(text: &str) -> (&'static str, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        ("-", rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        ("", rest)
    } else {
        ("", text)
    }
}

/// Validate integer text, returning it in the form `str::parse` accepts.
///
/// Unsigned representations reject any sign, including `+`.
fn normalize_integer(text: &str, signed: bool) -> Option<String> {
    let (sign, digits) = split_sign(text);
    if !signed && digits.len() != text.len() {
        return None;
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{sign}{digits}"))
}

/// Map the culture's decimal separator to `.` and reject anything that is
/// not part of a float literal. Letters other than the exponent marker are
/// refused, which keeps `inf` and `NaN` out.
fn normalize_float(text: &str, culture: &Culture) -> Option<String> {
    let mut normalized = String::with_capacity(text.len());
    for c in text.chars() {
        if c == culture.decimal_separator() {
            normalized.push('.');
        } else if c.is_ascii_digit() || matches!(c, '+' | '-' | 'e' | 'E') {
            normalized.push(c);
        } else {
            return None;
        }
    }
    Some(normalized)
}

/// Validate decimal text: sign, grouped integer digits, culture separator,
/// fraction digits. No exponent.
fn normalize_decimal(text: &str, culture: &Culture) -> Option<String> {
    let (sign, body) = split_sign(text);
    let (integer, fraction) = match body.split_once(culture.decimal_separator()) {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (body, None),
    };

    let mut normalized = String::from(sign);
    let mut digit_count = 0;
    for c in integer.chars() {
        if c.is_ascii_digit() {
            normalized.push(c);
            digit_count += 1;
        } else if c == culture.group_separator() && digit_count > 0 {
            continue;
        } else {
            return None;
        }
    }
    if digit_count == 0 {
        normalized.push('0');
    }

    if let Some(fraction) = fraction {
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !fraction.is_empty() {
            normalized.push('.');
            normalized.push_str(fraction);
            digit_count += fraction.len();
        }
    }

    (digit_count > 0).then_some(normalized)
}

// =============================================================================
// Fixed Width Integers
// =============================================================================

macro_rules! integer_numeric {
    ($ty:ty, $kind:ident, signed: $signed:tt) => {
        impl Numeric for $ty {
            const KIND: NumberKind = NumberKind::$kind;

            fn natural_min() -> Option<Self> {
                Some(<$ty>::MIN)
            }

            fn natural_max() -> Option<Self> {
                Some(<$ty>::MAX)
            }

            fn default_step() -> Self {
                1
            }

            integer_numeric!(@negative $signed);

            fn parse(text: &str, _culture: &Culture) -> Option<Self> {
                normalize_integer(text, $signed)?.parse().ok()
            }

            fn format(&self, _culture: &Culture) -> String {
                self.to_string()
            }

            fn step_up(&self, step: &Self) -> Option<Self> {
                <$ty>::checked_add(*self, *step)
            }

            fn step_down(&self, step: &Self) -> Option<Self> {
                <$ty>::checked_sub(*self, *step)
            }

            fn into_number(self) -> Number {
                Number::$kind(self)
            }
        }
    };
    (@negative true) => {
        fn is_negative(&self) -> bool {
            *self < 0
        }
    };
    (@negative false) => {
        fn is_negative(&self) -> bool {
            false
        }
    };
}

integer_numeric!(i8, SByte, signed: true);
integer_numeric!(u8, Byte, signed: false);
integer_numeric!(i16, Short, signed: true);
integer_numeric!(u16, UShort, signed: false);
integer_numeric!(i32, Int, signed: true);
integer_numeric!(u32, UInt, signed: false);
integer_numeric!(i64, Long, signed: true);
integer_numeric!(u64, ULong, signed: false);

// =============================================================================
// Floating Point
// =============================================================================

macro_rules! float_numeric {
    ($ty:ty, $kind:ident) => {
        impl Numeric for $ty {
            const KIND: NumberKind = NumberKind::$kind;

            fn natural_min() -> Option<Self> {
                Some(<$ty>::MIN)
            }

            fn natural_max() -> Option<Self> {
                Some(<$ty>::MAX)
            }

            fn default_step() -> Self {
                1.0
            }

            fn is_negative(&self) -> bool {
                *self < 0.0
            }

            fn parse(text: &str, culture: &Culture) -> Option<Self> {
                let value: $ty = normalize_float(text, culture)?.parse().ok()?;
                value.is_finite().then_some(value)
            }

            fn format(&self, culture: &Culture) -> String {
                // Display already yields the shortest text that round-trips
                culture.localize(&self.to_string())
            }

            fn step_up(&self, step: &Self) -> Option<Self> {
                let value = *self + *step;
                value.is_finite().then_some(value)
            }

            fn step_down(&self, step: &Self) -> Option<Self> {
                let value = *self - *step;
                value.is_finite().then_some(value)
            }

            fn into_number(self) -> Number {
                Number::$kind(self)
            }
        }
    };
}

float_numeric!(f32, Float);
float_numeric!(f64, Double);

// =============================================================================
// Arbitrary Precision
// =============================================================================

impl Numeric for BigInt {
    const KIND: NumberKind = NumberKind::BigInteger;

    fn natural_min() -> Option<Self> {
        None
    }

    fn natural_max() -> Option<Self> {
        None
    }

    fn default_step() -> Self {
        BigInt::from(1)
    }

    fn is_negative(&self) -> bool {
        self.sign() == num_bigint::Sign::Minus
    }

    fn parse(text: &str, _culture: &Culture) -> Option<Self> {
        BigInt::from_str(&normalize_integer(text, true)?).ok()
    }

    fn format(&self, _culture: &Culture) -> String {
        self.to_string()
    }

    fn step_up(&self, step: &Self) -> Option<Self> {
        Some(self + step)
    }

    fn step_down(&self, step: &Self) -> Option<Self> {
        Some(self - step)
    }

    fn into_number(self) -> Number {
        Number::BigInteger(self)
    }
}

impl Numeric for Decimal {
    const KIND: NumberKind = NumberKind::Decimal;

    fn natural_min() -> Option<Self> {
        Some(Decimal::MIN)
    }

    fn natural_max() -> Option<Self> {
        Some(Decimal::MAX)
    }

    fn default_step() -> Self {
        Decimal::ONE
    }

    fn is_negative(&self) -> bool {
        self.is_sign_negative() && !self.is_zero()
    }

    fn parse(text: &str, culture: &Culture) -> Option<Self> {
        Decimal::from_str(&normalize_decimal(text, culture)?).ok()
    }

    fn format(&self, culture: &Culture) -> String {
        culture.localize(&self.to_string())
    }

    fn step_up(&self, step: &Self) -> Option<Self> {
        self.checked_add(*step)
    }

    fn step_down(&self, step: &Self) -> Option<Self> {
        self.checked_sub(*step)
    }

    fn into_number(self) -> Number {
        Number::Decimal(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn german() -> Culture {
        Culture::from_name("de-DE").unwrap()
    }

    #[test]
    fn test_normalize_integer() {
        assert_eq!(normalize_integer("-42", true), Some("-42".to_string()));
        assert_eq!(normalize_integer("+42", true), Some("42".to_string()));
        assert_eq!(normalize_integer("+42", false), None);
        assert_eq!(normalize_integer("-42", false), None);
        assert_eq!(normalize_integer("-", true), None);
        assert_eq!(normalize_integer("4_2", true), None);
        assert_eq!(normalize_integer("1.0", true), None);
    }

    #[test]
    fn test_integer_parse() {
        let culture = Culture::invariant();
        assert_eq!(i32::parse("-17", &culture), Some(-17));
        assert_eq!(u8::parse("255", &culture), Some(255));
        assert_eq!(u8::parse("256", &culture), None);
        assert_eq!(i8::parse("-129", &culture), None);
        assert_eq!(u32::parse("+1", &culture), None);
        assert_eq!(i64::parse("12a", &culture), None);
    }

    #[test]
    fn test_integer_stepping_overflow() {
        assert_eq!(i8::MAX.step_up(&1), None);
        assert_eq!(0u16.step_down(&1), None);
        assert_eq!(5u16.step_down(&1), Some(4));
    }

    #[test]
    fn test_float_parse_culture() {
        assert_eq!(f64::parse("1.5", &Culture::invariant()), Some(1.5));
        assert_eq!(f64::parse("1,5", &german()), Some(1.5));
        assert_eq!(f64::parse("1.5", &german()), None);
        assert_eq!(f64::parse("-2.5e3", &Culture::invariant()), Some(-2500.0));
        assert_eq!(f64::parse(".5", &Culture::invariant()), Some(0.5));
        assert_eq!(f32::parse("inf", &Culture::invariant()), None);
        assert_eq!(f64::parse("NaN", &Culture::invariant()), None);
        assert_eq!(f64::parse("1e999", &Culture::invariant()), None);
    }

    #[test]
    fn test_float_format_culture() {
        assert_eq!(1.25f64.format(&german()), "1,25");
        assert_eq!((-0.5f32).format(&Culture::invariant()), "-0.5");
        assert_eq!(3.0f64.format(&Culture::invariant()), "3");
    }

    #[test]
    fn test_decimal_parse() {
        let invariant = Culture::invariant();
        assert_eq!(
            Decimal::parse("1,234.50", &invariant),
            Some(Decimal::new(123450, 2))
        );
        assert_eq!(
            Decimal::parse("1.234,5", &german()),
            Some(Decimal::new(12345, 1))
        );
        assert_eq!(Decimal::parse("-.5", &invariant), Some(Decimal::new(-5, 1)));
        assert_eq!(Decimal::parse("7.", &invariant), Some(Decimal::new(7, 0)));
        assert_eq!(Decimal::parse(",5", &invariant), None);
        assert_eq!(Decimal::parse("1e5", &invariant), None);
        assert_eq!(Decimal::parse(".", &invariant), None);
    }

    #[test]
    fn test_decimal_format_keeps_scale() {
        assert_eq!(Decimal::new(150, 2).format(&german()), "1,50");
    }

    #[test]
    fn test_big_integer() {
        let culture = Culture::invariant();
        let huge = BigInt::parse("123456789012345678901234567890", &culture).unwrap();
        assert_eq!(huge.format(&culture), "123456789012345678901234567890");
        assert!(BigInt::parse("-5", &culture).unwrap().is_negative());
        assert_eq!(BigInt::parse("1_000", &culture), None);
        assert_eq!(BigInt::natural_max(), None);
    }

    #[test]
    fn test_negative_zero_is_not_negative() {
        assert!(!Decimal::parse("-0", &Culture::invariant())
            .unwrap()
            .is_negative());
        assert!(!0i32.is_negative());
        assert!(!0u32.is_negative());
    }
}
