//! One interpreter session: persistent variables plus a turtle port.

use logo3d_eval::{
    EvalError, EvalOptions, Evaluator, LoggingTurtle, TurtleActions, Value, VariableStore,
};
use logo3d_lexer::Lexer;
use logo3d_parser::Parser;
use logo3d_types::{Diagnostics, SourceFile};
use thiserror::Error;
use tracing::{debug, warn};

use crate::report::{LogReporter, RuntimeErrorReporter, SyntaxErrorReporter};

/// Name given to every submission in diagnostics.
pub const CONSOLE_SOURCE_NAME: &str = "console";

/// Why a submission did not run to completion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretError {
    /// The submission did not parse; nothing was evaluated.
    #[error("syntax error:\n{0}")]
    Syntax(Diagnostics),
    /// Evaluation stopped part way; earlier effects remain.
    #[error(transparent)]
    Runtime(#[from] EvalError),
}

/// Runs submissions one after another against the same variables and port.
///
/// Only the [`VariableStore`] carries over between submissions; each
/// submission's AST is dropped once it has been evaluated.
pub struct Session<A: TurtleActions> {
    store: VariableStore,
    actions: A,
    options: EvalOptions,
    syntax_reporter: Box<dyn SyntaxErrorReporter>,
    runtime_reporter: Box<dyn RuntimeErrorReporter>,
}

impl Session<LoggingTurtle> {
    /// A session whose turtle only logs what it would do.
    pub fn headless() -> Self {
        Self::new(LoggingTurtle)
    }
}

impl<A: TurtleActions> Session<A> {
    pub fn new(actions: A) -> Self {
        Self::with_options(actions, EvalOptions::default())
    }

    pub fn with_options(actions: A, options: EvalOptions) -> Self {
        Self {
            store: VariableStore::new(),
            actions,
            options,
            syntax_reporter: Box::new(LogReporter),
            runtime_reporter: Box::new(LogReporter),
        }
    }

    /// Replace the syntax error callback.
    pub fn on_syntax_error(mut self, reporter: impl SyntaxErrorReporter + 'static) -> Self {
        self.syntax_reporter = Box::new(reporter);
        self
    }

    /// Replace the runtime error callback.
    pub fn on_runtime_error(mut self, reporter: impl RuntimeErrorReporter + 'static) -> Self {
        self.runtime_reporter = Box::new(reporter);
        self
    }

    /// Parse and evaluate one submission.
    ///
    /// On a syntax error every distinct message goes to the syntax reporter
    /// once and nothing runs. On a runtime error the runtime reporter is
    /// called once; port calls and variable writes made before the failure
    /// are kept.
    pub fn interpret(&mut self, source: &str) -> Result<Value, InterpretError> {
        debug!(source, "interpret");
        // Submissions are newline-terminated.
        let source_file = SourceFile::new(CONSOLE_SOURCE_NAME, format!("{source}\n"));

        let lexed = Lexer::new(&source_file).lex();
        let mut errors = lexed.errors;
        let parsed = Parser::new(lexed.tokens, &source_file).parse();
        errors.merge(parsed.errors);

        let program = match parsed.program {
            Some(program) if !errors.has_errors() => program,
            _ => {
                for error in &errors.errors {
                    warn!(code = %error.code, at = %error.span, "{}", error.message);
                }
                for message in errors.distinct_messages() {
                    self.syntax_reporter.on_syntax_error(message);
                }
                return Err(InterpretError::Syntax(errors));
            }
        };

        let result =
            Evaluator::new(&mut self.store, &mut self.actions, &self.options).eval_program(&program);
        result.map_err(|error| {
            debug!(%error, "runtime error");
            self.runtime_reporter.on_runtime_error(&error);
            InterpretError::Runtime(error)
        })
    }

    /// Bindings made so far, read-only.
    pub fn variables(&self) -> &VariableStore {
        &self.store
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Consume the session, returning the port.
    pub fn into_actions(self) -> A {
        self.actions
    }
}
