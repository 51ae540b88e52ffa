//! Logical Operators for Cypher
//!
//! Implements: AND, OR, XOR, NOT and the truthiness used by the planner's
//! multi-operand `Ands`/`Ors`. All operators implement three-valued logic.

use crate::error::{EvalError, EvalResult};
use cypher_types::CypherValue;

fn as_logical(value: &CypherValue) -> EvalResult<Option<bool>> {
    match value {
        CypherValue::Null => Ok(None),
        CypherValue::Boolean(b) => Ok(Some(*b)),
        other => Err(EvalError::type_mismatch("Boolean", other.type_name())),
    }
}

fn from_logical(value: Option<bool>) -> CypherValue {
    value.map_or(CypherValue::Null, CypherValue::Boolean)
}

/// Evaluate AND with three-valued logic
///
/// Truth table:
/// | A     | B     | A AND B |
/// |-------|-------|---------|
/// | true  | true  | true    |
/// | true  | null  | null    |
/// | false | *     | false   |
/// | null  | false | false   |
/// | null  | null  | null    |
pub fn and(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    let result = match (as_logical(left)?, as_logical(right)?) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    };
    Ok(from_logical(result))
}

/// Evaluate OR with three-valued logic
///
/// Truth table:
/// | A     | B     | A OR B |
/// |-------|-------|--------|
/// | true  | *     | true   |
/// | false | false | false  |
/// | false | null  | null   |
/// | null  | true  | true   |
/// | null  | null  | null   |
pub fn or(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    let result = match (as_logical(left)?, as_logical(right)?) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    };
    Ok(from_logical(result))
}

/// Evaluate XOR: null if either side is null
pub fn xor(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    let result = match (as_logical(left)?, as_logical(right)?) {
        (Some(a), Some(b)) => Some(a != b),
        _ => None,
    };
    Ok(from_logical(result))
}

/// Evaluate NOT
pub fn not(operand: &CypherValue) -> EvalResult<CypherValue> {
    Ok(from_logical(as_logical(operand)?.map(|b| !b)))
}

/// Truthiness of an operand of `Ands`/`Ors`
///
/// Booleans are their own value, a list is truthy when non-empty and null is
/// never truthy.
pub fn is_truthy(value: &CypherValue) -> EvalResult<bool> {
    match value {
        CypherValue::Boolean(b) => Ok(*b),
        CypherValue::List(items) => Ok(!items.is_empty()),
        CypherValue::Null => Ok(false),
        other => Err(EvalError::type_mismatch("Boolean or List", other.type_name())),
    }
}
