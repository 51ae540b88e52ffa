//! Evaluator configuration

use serde::{Deserialize, Serialize};

/// Tuning knobs for [`CypherEngine`](crate::CypherEngine).
///
/// Deserializable so hosts can embed it in their own configuration; missing
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorOptions {
    /// Maximum expression nesting depth before `RecursionLimit`
    pub max_depth: usize,
    /// Number of compiled regular expressions kept for `=~`
    pub regex_cache_capacity: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: 512,
            regex_cache_capacity: 64,
        }
    }
}

impl EvaluatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_regex_cache_capacity(mut self, capacity: usize) -> Self {
        self.regex_cache_capacity = capacity;
        self
    }
}
