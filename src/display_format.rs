//! Display templates applied to the text when a number box loses focus.
//!
//! Supported placeholders, all referring to the value as argument `0`:
//!
//! | Placeholder | Output                                   |
//! |-------------|------------------------------------------|
//! | `{0}`       | the value as the box renders it          |
//! | `{0:Fn}`    | fixed point with `n` decimals (default 2) |
//! | `{0:Nn}`    | like `F`, with digit grouping            |
//! | `{0:Dn}`    | integer padded with zeros to `n` digits  |
//!
//! `{{` and `}}` produce literal braces. An absent value renders as nothing.

use numbox_core::{Culture, Number};

/// Decimals used by `F` and `N` without an explicit precision.
const DEFAULT_DECIMALS: usize = 2;

/// Largest precision accepted in a placeholder.
const MAX_PRECISION: usize = 99;

/// One `{0...}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spec {
    General,
    Fixed(usize),
    Grouped(usize),
    Padded(usize),
}

/// Render `template` for `value` in `culture`.
///
/// Returns `None` if the template is malformed or a placeholder does not
/// apply to the value (`D` on a fractional number).
pub fn apply(template: &str, value: Option<&Number>, culture: &Culture) -> Option<String> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '{' => {
                let mut placeholder = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        c => placeholder.push(c),
                    }
                }
                let spec = parse_placeholder(&placeholder)?;
                if let Some(value) = value {
                    output.push_str(&render(spec, value, culture)?);
                }
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '}' => return None,
            c => output.push(c),
        }
    }

    Some(output)
}

fn parse_placeholder(placeholder: &str) -> Option<Spec> {
    let (index, format) = match placeholder.split_once(':') {
        Some((index, format)) => (index, Some(format)),
        None => (placeholder, None),
    };
    if index.trim() != "0" {
        return None;
    }
    let Some(format) = format else {
        return Some(Spec::General);
    };

    let mut format = format.chars();
    let letter = format.next()?;
    let digits = format.as_str();
    let precision = if digits.is_empty() {
        None
    } else {
        let precision = digits.parse::<usize>().ok()?;
        if precision > MAX_PRECISION {
            return None;
        }
        Some(precision)
    };

    match letter.to_ascii_uppercase() {
        'F' => Some(Spec::Fixed(precision.unwrap_or(DEFAULT_DECIMALS))),
        'N' => Some(Spec::Grouped(precision.unwrap_or(DEFAULT_DECIMALS))),
        'D' => Some(Spec::Padded(precision.unwrap_or(0))),
        _ => None,
    }
}

fn render(spec: Spec, value: &Number, culture: &Culture) -> Option<String> {
    match spec {
        Spec::General => Some(culture.localize(&value.to_string())),
        Spec::Fixed(decimals) => {
            let text = fixed(value, decimals);
            let (sign, integer, fraction) = split(&text);
            Some(join(sign, integer, fraction, culture))
        }
        Spec::Grouped(decimals) => {
            let text = fixed(value, decimals);
            let (sign, integer, fraction) = split(&text);
            Some(join(sign, &culture.group_digits(integer), fraction, culture))
        }
        Spec::Padded(width) => {
            if value.kind().is_fractional() {
                return None;
            }
            let text = value.to_string();
            let (sign, digits, _) = split(&text);
            Some(format!("{sign}{digits:0>width$}"))
        }
    }
}

/// Invariant fixed point text with exactly `decimals` fraction digits.
fn fixed(value: &Number, decimals: usize) -> String {
    match value {
        Number::Float(v) => format!("{v:.decimals$}"),
        Number::Double(v) => format!("{v:.decimals$}"),
        Number::Decimal(v) => format!("{:.decimals$}", v.round_dp(decimals as u32)),
        integer => {
            let text = integer.to_string();
            if decimals == 0 {
                text
            } else {
                format!("{text}.{}", "0".repeat(decimals))
            }
        }
    }
}

/// Split invariant numeric text into sign, integer digits and fraction digits.
fn split(text: &str) -> (&str, &str, &str) {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    (sign, integer, fraction)
}

fn join(sign: &str, integer: &str, fraction: &str, culture: &Culture) -> String {
    if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}{}{fraction}", culture.decimal_separator())
    }
}

#[cfg(test)]
mod tests {
    use numbox_core::Decimal;

    use super::*;

    fn invariant(template: &str, value: Number) -> Option<String> {
        apply(template, Some(&value), &Culture::invariant())
    }

    #[test]
    fn test_general_placeholder() {
        assert_eq!(invariant("{0}", Number::Int(42)).as_deref(), Some("42"));
        assert_eq!(
            invariant("{0} kg", Number::Double(2.5)).as_deref(),
            Some("2.5 kg")
        );
        let german = Culture::from_name("de-DE").unwrap();
        assert_eq!(
            apply("{0}", Some(&Number::Double(2.5)), &german).as_deref(),
            Some("2,5")
        );
    }

    #[test]
    fn test_fixed() {
        assert_eq!(invariant("{0:F2}", Number::Double(2.5)).as_deref(), Some("2.50"));
        assert_eq!(invariant("{0:F}", Number::Int(-7)).as_deref(), Some("-7.00"));
        assert_eq!(invariant("{0:f0}", Number::Int(7)).as_deref(), Some("7"));
        assert_eq!(
            invariant("{0:F1}", Number::Decimal(Decimal::new(1234, 3))).as_deref(),
            Some("1.2")
        );
    }

    #[test]
    fn test_grouped() {
        assert_eq!(
            invariant("{0:N2}", Number::Long(1234567)).as_deref(),
            Some("1,234,567.00")
        );
        let german = Culture::from_name("de-DE").unwrap();
        assert_eq!(
            apply("{0:N1}", Some(&Number::Double(-9876.5)), &german).as_deref(),
            Some("-9.876,5")
        );
    }

    #[test]
    fn test_padded() {
        assert_eq!(invariant("{0:D3}", Number::Byte(7)).as_deref(), Some("007"));
        assert_eq!(invariant("{0:D3}", Number::Short(-7)).as_deref(), Some("-007"));
        assert_eq!(invariant("{0:D1}", Number::Int(1234)).as_deref(), Some("1234"));
        assert_eq!(invariant("{0:D2}", Number::Double(1.0)), None);
    }

    #[test]
    fn test_escapes_and_absent_value() {
        assert_eq!(
            invariant("{{{0}}}", Number::Int(1)).as_deref(),
            Some("{1}")
        );
        assert_eq!(
            apply("[{0:F2}]", None, &Culture::invariant()).as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_invalid_templates() {
        assert_eq!(invariant("{1}", Number::Int(1)), None);
        assert_eq!(invariant("{0", Number::Int(1)), None);
        assert_eq!(invariant("0}", Number::Int(1)), None);
        assert_eq!(invariant("{0:X2}", Number::Int(1)), None);
        assert_eq!(invariant("{0:F1000}", Number::Int(1)), None);
        assert_eq!(invariant("{0,5}", Number::Int(1)), None);
    }
}
