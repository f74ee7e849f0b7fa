//! logo3d interpreter session.
//!
//! Ties the front end to the evaluator: a [`Session`] lexes and parses each
//! submission, reports syntax errors through a callback, and evaluates
//! successful parses against variables that persist across submissions.

mod report;
mod session;

pub use report::{LogReporter, RuntimeErrorReporter, SyntaxErrorReporter};
pub use session::{InterpretError, Session, CONSOLE_SOURCE_NAME};
