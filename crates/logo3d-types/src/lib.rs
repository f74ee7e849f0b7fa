//! Shared types for the logo3d interpreter.
//!
//! This crate defines the AST node types, source spans and front-end
//! diagnostics shared by the lexer, parser, evaluator and session.

mod error;
mod span;
pub mod ast;

pub use error::{Diagnostics, ErrorCategory, ErrorCode, LogoError, Severity, MAX_ERRORS};
pub use span::{SourceFile, Span};
