//! The session's variable store.

use std::collections::BTreeMap;

use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// Flat global name → value map.
///
/// There is a single namespace: `make` bindings and `for` loop counters share
/// it, so a loop over `i` overwrites a `make "i`. Names are case-sensitive.
/// The store lives as long as the session and is never reset between
/// submissions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    bindings: BTreeMap<String, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Look up a binding. An unbound name is an error, never a default.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }
}
