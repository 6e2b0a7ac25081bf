//! Typed attribute values and type-aware comparison.

use std::cmp::Ordering;

use chrono::NaiveDate;

/// A typed attribute value as seen by the filter evaluator.
///
/// Attribute text is promoted to the richest type it parses as, in a fixed
/// order: number first, then ISO date, else plain string. Comparison between
/// two values re-applies the same promotion so that `"5"` and `5` compare
/// numerically and `"2024-01-01"` compares chronologically against a date.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain text.
    Str(String),

    /// Numeric value (integer or decimal).
    Number(f64),

    /// Calendar date (no time component).
    Date(NaiveDate),
}

impl Value {
    /// Infers the type of a literal: numeric, then date, else string.
    pub fn infer(text: &str) -> Value {
        if let Ok(n) = text.parse::<f64>() {
            return Value::Number(n);
        }
        if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Value::Date(d);
        }
        Value::Str(text.to_string())
    }

    /// Returns the value rendered back as text.
    pub fn as_text(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Str(s) => s.parse::<f64>().ok(),
            Value::Date(_) => None,
        }
    }

    fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Str(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            Value::Number(_) => None,
        }
    }

    /// Compares two values with type promotion.
    ///
    /// If both sides are (or parse as) numbers, the comparison is numeric.
    /// If both sides are (or parse as) dates, it is chronological. Otherwise
    /// the textual forms are compared lexically.
    pub fn compare(&self, other: &Value) -> Ordering {
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
        if let (Some(a), Some(b)) = (self.as_date(), other.as_date()) {
            return a.cmp(&b);
        }
        self.as_text().cmp(&other.as_text())
    }

    /// Type-aware equality, consistent with [`Value::compare`].
    pub fn same(&self, other: &Value) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Returns true for the empty string value.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_number() {
        assert_eq!(Value::infer("5"), Value::Number(5.0));
        assert_eq!(Value::infer("3.25"), Value::Number(3.25));
        assert_eq!(Value::infer("-2"), Value::Number(-2.0));
    }

    #[test]
    fn test_infer_date() {
        assert_eq!(
            Value::infer("2024-01-15"),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_infer_string() {
        assert_eq!(Value::infer("urgent"), Value::Str("urgent".to_string()));
        // Malformed dates stay strings
        assert_eq!(
            Value::infer("2024-13-99"),
            Value::Str("2024-13-99".to_string())
        );
    }

    #[test]
    fn test_numeric_promotion_in_compare() {
        let a = Value::Str("5".to_string());
        let b = Value::Number(5.0);
        assert!(a.same(&b));

        let c = Value::Str("10".to_string());
        // Numeric, not lexical: "10" > "5" numerically even though "10" < "5" as text
        assert_eq!(c.compare(&a), Ordering::Greater);
    }

    #[test]
    fn test_date_promotion_in_compare() {
        let a = Value::Str("2024-01-01".to_string());
        let b = Value::Date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_string_compare_fallback() {
        let a = Value::Str("alpha".to_string());
        let b = Value::Str("beta".to_string());
        assert_eq!(a.compare(&b), Ordering::Less);
        assert!(!a.same(&b));
    }

    #[test]
    fn test_is_empty_text() {
        assert!(Value::Str(String::new()).is_empty_text());
        assert!(!Value::Str("x".to_string()).is_empty_text());
        assert!(!Value::Number(0.0).is_empty_text());
    }
}
