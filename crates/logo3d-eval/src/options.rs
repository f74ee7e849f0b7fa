//! Evaluation options.
//!
//! The defaults reproduce the long-standing console behaviour; the
//! alternatives are opt-in corrections.

use serde::{Deserialize, Serialize};

/// Default iteration budget for a single `for` statement.
pub const DEFAULT_MAX_LOOP_ITERATIONS: u64 = 100_000;

/// How a `for` loop treats its end bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopBound {
    /// The end bound is exclusive unless the loop counts from its own step
    /// (`1 10 1`), in which case it is inclusive.
    ///
    /// This is a heuristic fitted to the console's recorded counts (`9 13 1`
    /// runs 4 times, `1 10 1` runs 10 times), not a documented rule. The
    /// intended bound is still unsettled; until it is, hosts that want a
    /// predictable bound should pick `Inclusive`.
    #[default]
    Legacy,
    /// The end bound is always inclusive.
    Inclusive,
}

/// How `if` treats its condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionalMode {
    /// The condition is evaluated for its errors, then the block always runs.
    #[default]
    Legacy,
    /// The block runs only when the condition is non-zero.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalOptions {
    pub loop_bound: LoopBound,
    pub conditionals: ConditionalMode,
    /// Iterations one `for` statement may run before failing.
    pub max_loop_iterations: u64,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            loop_bound: LoopBound::default(),
            conditionals: ConditionalMode::default(),
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
        }
    }
}

impl EvalOptions {
    /// Inclusive loops and honoured conditions.
    pub fn corrected() -> Self {
        Self {
            loop_bound: LoopBound::Inclusive,
            conditionals: ConditionalMode::Strict,
            ..Self::default()
        }
    }

    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_legacy() {
        let options = EvalOptions::default();
        assert_eq!(options.loop_bound, LoopBound::Legacy);
        assert_eq!(options.conditionals, ConditionalMode::Legacy);
        assert_eq!(options.max_loop_iterations, DEFAULT_MAX_LOOP_ITERATIONS);
    }

    #[test]
    fn test_from_json_partial() {
        let options = EvalOptions::from_json(r#"{ "conditionals": "strict" }"#).unwrap();
        assert_eq!(options.conditionals, ConditionalMode::Strict);
        assert_eq!(options.loop_bound, LoopBound::Legacy);
    }

    #[test]
    fn test_from_json_full() {
        let json = r#"{
            "loop_bound": "inclusive",
            "conditionals": "strict",
            "max_loop_iterations": 50
        }"#;
        let options = EvalOptions::from_json(json).unwrap();
        assert_eq!(
            options,
            EvalOptions {
                max_loop_iterations: 50,
                ..EvalOptions::corrected()
            }
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        assert!(EvalOptions::from_json(r#"{ "loops": "inclusive" }"#).is_err());
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        assert!(EvalOptions::from_json(r#"{ "conditionals": "sometimes" }"#).is_err());
    }
}
