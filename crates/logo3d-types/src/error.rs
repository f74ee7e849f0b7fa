use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of errors reported for one submission before fail-fast.
pub const MAX_ERRORS: usize = 20;

/// Error severity. Every front-end diagnostic is currently an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Structure,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Structure => write!(f, "structure"),
        }
    }
}

/// Numeric diagnostic code (E100–E299).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const UNEXPECTED_TOKEN: Self = Self(100);
    pub const EMPTY_QUOTED_WORD: Self = Self(101);
    pub const UNCLOSED_BRACKET: Self = Self(102);
    pub const MISPLACED_KEYWORD: Self = Self(103);
    pub const EXPECTED_NUMBER_AFTER_SIGN: Self = Self(104);

    // ── Structure errors (E200–E299) ──
    pub const CHAINED_COMPARISON: Self = Self(200);
    pub const NESTING_LIMIT_EXCEEDED: Self = Self(201);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            200..=299 => ErrorCategory::Structure,
            _ => ErrorCategory::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A structured front-end diagnostic.
///
/// Hosts render these from the fields; the message alone is what reaches the
/// single-callback syntax error channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{span}: {code} [{category}] {message}")]
pub struct LogoError {
    /// Source name (the console uses `"console"`).
    pub file: String,
    pub code: ErrorCode,
    pub severity: Severity,
    /// Derived from `code`.
    pub category: ErrorCategory,
    pub message: String,
    #[serde(flatten)]
    pub span: Span,
    /// The exact source line for context.
    pub source_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl LogoError {
    /// Create a new error.
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            span,
            source_line: source_line.into(),
            suggestion: None,
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Diagnostics collected while lexing and parsing one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<LogoError>,
    pub total_errors: usize,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Returns `true` once the `MAX_ERRORS` cap is reached.
    pub fn is_full(&self) -> bool {
        self.total_errors >= MAX_ERRORS
    }

    /// Add an error, respecting the `MAX_ERRORS` limit.
    pub fn push_error(&mut self, error: LogoError) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    /// Append everything from `other`.
    pub fn merge(&mut self, other: Diagnostics) {
        let hidden = other.total_errors - other.errors.len();
        for error in other.errors {
            self.push_error(error);
        }
        self.total_errors += hidden;
    }

    /// Error messages in report order with duplicates removed.
    pub fn distinct_messages(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !seen.contains(&error.message.as_str()) {
                seen.push(&error.message);
            }
        }
        seen
    }

    /// Serialize to JSON for hosts that render diagnostics themselves.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(message: &str) -> LogoError {
        LogoError::new("console", ErrorCode::UNEXPECTED_TOKEN, message, Span::point(1, 1), "")
    }

    #[test]
    fn test_code_category() {
        assert_eq!(ErrorCode::UNEXPECTED_TOKEN.category(), ErrorCategory::Syntax);
        assert_eq!(ErrorCode::UNCLOSED_BRACKET.category(), ErrorCategory::Syntax);
        assert_eq!(ErrorCode::CHAINED_COMPARISON.category(), ErrorCategory::Structure);
    }

    #[test]
    fn test_error_display() {
        let err = LogoError::new(
            "console",
            ErrorCode::UNCLOSED_BRACKET,
            "unclosed '['",
            Span::new(1, 7, 1, 7),
            "print [a",
        );
        assert_eq!(err.to_string(), "1:7: E102 [syntax] unclosed '['");
    }

    #[test]
    fn test_push_respects_cap() {
        let mut diags = Diagnostics::empty();
        for i in 0..(MAX_ERRORS + 5) {
            diags.push_error(error(&format!("error {i}")));
        }
        assert_eq!(diags.errors.len(), MAX_ERRORS);
        assert_eq!(diags.total_errors, MAX_ERRORS + 5);
        assert!(diags.is_full());
    }

    #[test]
    fn test_merge_keeps_totals() {
        let mut a = Diagnostics::empty();
        a.push_error(error("one"));
        let mut b = Diagnostics::empty();
        b.push_error(error("two"));
        b.push_error(error("three"));
        a.merge(b);
        assert_eq!(a.total_errors, 3);
        assert_eq!(a.errors.len(), 3);
    }

    #[test]
    fn test_distinct_messages() {
        let mut diags = Diagnostics::empty();
        diags.push_error(error("expected expression"));
        diags.push_error(error("unclosed '['"));
        diags.push_error(error("expected expression"));
        assert_eq!(diags.distinct_messages(), vec!["expected expression", "unclosed '['"]);
    }

    #[test]
    fn test_json_shape() {
        let mut diags = Diagnostics::empty();
        diags.push_error(error("boom").with_suggestion("try again"));
        let json: serde_json::Value = serde_json::from_str(&diags.to_json().unwrap()).unwrap();
        assert_eq!(json["total_errors"], 1);
        assert_eq!(json["errors"][0]["code"], 100);
        assert_eq!(json["errors"][0]["category"], "syntax");
        assert_eq!(json["errors"][0]["start_line"], 1);
        assert_eq!(json["errors"][0]["suggestion"], "try again");
    }
}
