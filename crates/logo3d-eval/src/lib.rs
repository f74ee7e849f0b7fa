//! logo3d tree-walking evaluator.
//!
//! Walks a parsed program against a [`VariableStore`], turning movement,
//! turn and print commands into calls on a [`TurtleActions`] port.

pub mod actions;
mod error;
mod evaluator;
pub mod options;
mod store;
mod value;

pub use actions::{ActionRecorder, LoggingTurtle, TurtleAction, TurtleActions};
pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use options::{ConditionalMode, EvalOptions, LoopBound, DEFAULT_MAX_LOOP_ITERATIONS};
pub use store::VariableStore;
pub use value::Value;
