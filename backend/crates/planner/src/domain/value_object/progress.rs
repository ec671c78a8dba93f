//! Progress Value Object
//!
//! Goal completion percentage, always within `0..=100`.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    pub const MAX: u8 = 100;

    /// Clamp any integer into range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    /// Lenient coercion of client input: numbers are truncated, strings
    /// contribute their leading integer, anything else counts as 0.
    pub fn coerce(value: &Value) -> Self {
        let n = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(0),
            Value::String(s) => parse_leading_int(s).unwrap_or(0),
            _ => 0,
        };
        Self::clamped(n)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Leading optional sign and decimal digits after any whitespace, so
/// `"42abc"` is 42 and `"abc"` is `None`. Saturates on overflow.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(Progress::coerce(&json!(50)).value(), 50);
        assert_eq!(Progress::coerce(&json!(150)).value(), 100);
        assert_eq!(Progress::coerce(&json!(-5)).value(), 0);
        assert_eq!(Progress::coerce(&json!(75.9)).value(), 75);
    }

    #[test]
    fn test_coerce_other_values() {
        assert_eq!(Progress::coerce(&json!("42")).value(), 42);
        assert_eq!(Progress::coerce(&json!("42abc")).value(), 42);
        assert_eq!(Progress::coerce(&json!("abc")).value(), 0);
        assert_eq!(Progress::coerce(&json!(null)).value(), 0);
        assert_eq!(Progress::coerce(&json!(true)).value(), 0);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int(" -3x"), Some(-3));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
