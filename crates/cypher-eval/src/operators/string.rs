//! String Operators for Cypher
//!
//! Implements: STARTS WITH, ENDS WITH, CONTAINS, =~
//!
//! A null left-hand operand makes the predicate `false`; a null right-hand
//! operand makes it null.

use crate::error::{EvalError, EvalResult};
use cypher_types::CypherValue;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;

/// Shared shape of the string predicates
fn string_predicate(
    left: &CypherValue,
    right: &CypherValue,
    test: impl FnOnce(&str, &str) -> EvalResult<bool>,
) -> EvalResult<CypherValue> {
    match (left, right) {
        (CypherValue::Null, _) => Ok(CypherValue::Boolean(false)),
        (_, CypherValue::Null) => Ok(CypherValue::Null),
        (CypherValue::String(l), CypherValue::String(r)) => Ok(CypherValue::Boolean(test(l, r)?)),
        (CypherValue::String(_), other) | (other, _) => {
            Err(EvalError::type_mismatch("String", other.type_name()))
        }
    }
}

/// Evaluate `STARTS WITH`
pub fn starts_with(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    string_predicate(left, right, |l, r| Ok(l.starts_with(r)))
}

/// Evaluate `ENDS WITH`
pub fn ends_with(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    string_predicate(left, right, |l, r| Ok(l.ends_with(r)))
}

/// Evaluate `CONTAINS`
pub fn contains(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    string_predicate(left, right, |l, r| Ok(l.contains(r)))
}

/// Evaluate `=~`: the whole left operand must match the pattern
pub fn regex_match(
    cache: &RegexCache,
    left: &CypherValue,
    right: &CypherValue,
) -> EvalResult<CypherValue> {
    string_predicate(left, right, |text, pattern| {
        Ok(cache.compile(pattern)?.is_match(text))
    })
}

// ============================================================================
// Regex cache
// ============================================================================

/// Compiled regex cache keyed by pattern source
///
/// When full, the cache is cleared before the next insertion. A capacity of
/// zero disables caching.
#[derive(Debug)]
pub struct RegexCache {
    entries: Mutex<HashMap<String, Regex>>,
    capacity: usize,
}

impl RegexCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    /// Compiled, anchored regex for `pattern`
    pub fn compile(&self, pattern: &str) -> EvalResult<Regex> {
        if let Some(regex) = self.entries.lock().get(pattern) {
            return Ok(regex.clone());
        }

        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|_| EvalError::invalid_regex(pattern))?;

        if self.capacity > 0 {
            let mut entries = self.entries.lock();
            if entries.len() >= self.capacity {
                entries.clear();
            }
            entries.insert(pattern.to_string(), regex.clone());
        }
        Ok(regex)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
