//! Runtime values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};

/// The result of evaluating any node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Number(f64),
    String(String),
    /// Statement result; carries nothing and prints as the empty string.
    Void,
}

impl Value {
    /// Name of the value's kind, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Void => "void",
        }
    }

    /// The numeric payload, or `TypeMismatch` for any other kind.
    pub fn as_number(&self) -> EvalResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(EvalError::TypeMismatch(format!(
                "expected number, got {} '{other}'",
                other.type_name()
            ))),
        }
    }

    /// Canonical text of any value.
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{s}"),
            Value::Void => Ok(()),
        }
    }
}

/// Decimal form with at least one fractional digit: `4.0`, `2.5`, `-0.5`.
/// Never uses exponent notation.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        // `Display` for f64 is plain decimal at every magnitude
        let text = n.to_string();
        if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_keeps_fraction() {
        assert_eq!(Value::Number(4.0).to_string(), "4.0");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-10.0).to_string(), "-10.0");
    }

    #[test]
    fn test_number_display_never_uses_exponent() {
        assert_eq!(Value::Number(1e16).to_string(), "10000000000000000.0");
        assert_eq!(
            Value::Number(1e21).to_string(),
            "1000000000000000000000.0"
        );
        assert_eq!(Value::Number(1e-5).to_string(), "0.00001");
        assert_eq!(Value::Number(-2.5e-7).to_string(), "-0.00000025");
    }

    #[test]
    fn test_non_finite_display() {
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_string_and_void_display() {
        assert_eq!(Value::String("hello".into()).to_string(), "hello");
        assert_eq!(Value::Void.to_string(), "");
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Value::Number(3.0).as_number(), Ok(3.0));
        let err = Value::String("abc".into()).as_number().unwrap_err();
        assert_eq!(
            err,
            EvalError::TypeMismatch("expected number, got string 'abc'".into())
        );
        assert!(Value::Void.as_number().is_err());
    }

    #[test]
    fn test_as_string_is_total() {
        assert_eq!(Value::Number(1.0).as_string(), "1.0");
        assert_eq!(Value::String("x".into()).as_string(), "x");
        assert_eq!(Value::Void.as_string(), "");
    }

    #[test]
    fn test_equality_needs_same_kind() {
        assert_eq!(Value::Number(1.0), Value::Number(1.0));
        assert_ne!(Value::Number(1.0), Value::String("1.0".into()));
        assert_eq!(Value::Void, Value::Void);
    }

    #[test]
    fn test_value_json() {
        let json = serde_json::to_string(&Value::Number(1.5)).unwrap();
        assert_eq!(json, r#"{"kind":"number","value":1.5}"#);
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Value::Number(1.5));
    }
}
