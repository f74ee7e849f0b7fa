//! Error callbacks for hosts.

use logo3d_eval::EvalError;
use tracing::{debug, warn};

/// Receives one message per distinct syntax error in a submission.
pub trait SyntaxErrorReporter {
    fn on_syntax_error(&mut self, message: &str);
}

/// Receives the error that aborted a submission at runtime.
pub trait RuntimeErrorReporter {
    fn on_runtime_error(&mut self, error: &EvalError);
}

impl<F: FnMut(&str)> SyntaxErrorReporter for F {
    fn on_syntax_error(&mut self, message: &str) {
        self(message);
    }
}

impl<F: FnMut(&EvalError)> RuntimeErrorReporter for F {
    fn on_runtime_error(&mut self, error: &EvalError) {
        self(error);
    }
}

/// Default reporter: both kinds of error go to the log. The session already
/// logs each syntax error at `warn`, so this one only adds a `debug` line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl SyntaxErrorReporter for LogReporter {
    fn on_syntax_error(&mut self, message: &str) {
        debug!("Syntax error: {message}");
    }
}

impl RuntimeErrorReporter for LogReporter {
    fn on_runtime_error(&mut self, error: &EvalError) {
        warn!(%error, "submission aborted");
    }
}
