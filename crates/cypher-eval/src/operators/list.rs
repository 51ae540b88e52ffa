//! List Operators for Cypher
//!
//! Implements: IN, subscript (`l[i]`, `m['key']`) and slicing (`l[a..b]`)

use super::comparison::cypher_equal;
use crate::error::{EvalError, EvalResult};
use cypher_types::CypherValue;

/// Evaluate `item IN list`
///
/// | item  | list                 | result |
/// |-------|----------------------|--------|
/// | *     | null                 | null   |
/// | *     | []                   | false  |
/// | null  | non-empty            | null   |
/// | x     | contains x           | true   |
/// | x     | no x, contains null  | null   |
/// | x     | no x, no null        | false  |
pub fn in_list(item: &CypherValue, list: &CypherValue) -> EvalResult<CypherValue> {
    let items = match list {
        CypherValue::Null => return Ok(CypherValue::Null),
        CypherValue::List(items) => items,
        other => return Err(EvalError::type_mismatch("List", other.type_name())),
    };

    if items.is_empty() {
        return Ok(CypherValue::Boolean(false));
    }

    let mut uncertain = false;
    for candidate in items {
        match cypher_equal(item, candidate) {
            Some(true) => return Ok(CypherValue::Boolean(true)),
            Some(false) => {}
            None => uncertain = true,
        }
    }
    Ok(if uncertain {
        CypherValue::Null
    } else {
        CypherValue::Boolean(false)
    })
}

/// Resolve a possibly negative index against a length
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    (0..len).contains(&resolved).then_some(resolved as usize)
}

/// Evaluate `container[index]`
///
/// Lists take integer indices (negative counts from the end); maps, nodes and
/// relationships take string keys. Out of range or absent keys give null.
pub fn index_value(container: &CypherValue, index: &CypherValue) -> EvalResult<CypherValue> {
    match (container, index) {
        (CypherValue::Null, _) | (_, CypherValue::Null) => Ok(CypherValue::Null),
        (CypherValue::List(items), CypherValue::Integer(i)) => Ok(resolve_index(*i, items.len())
            .map(|i| items[i].clone())
            .unwrap_or(CypherValue::Null)),
        (CypherValue::List(_), other) => Err(EvalError::type_mismatch("Integer", other.type_name())),
        (
            CypherValue::Map(_) | CypherValue::Node(_) | CypherValue::Relationship(_),
            CypherValue::String(key),
        ) => Ok(container.component(key).unwrap_or(CypherValue::Null)),
        (CypherValue::Map(_) | CypherValue::Node(_) | CypherValue::Relationship(_), other) => {
            Err(EvalError::type_mismatch("String", other.type_name()))
        }
        (other, _) => Err(EvalError::type_mismatch(
            "List, Map, Node or Relationship",
            other.type_name(),
        )),
    }
}

/// Clamp a possibly negative slice bound into `0..=len`
fn clamp_bound(bound: i64, len: usize) -> usize {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if bound < 0 {
        len_i.saturating_add(bound)
    } else {
        bound
    };
    resolved.clamp(0, len_i) as usize
}

/// Evaluate `list[from..to]`
///
/// Missing bounds default to the ends of the list, negative bounds count from
/// the end, and bounds are clamped. A null bound makes the result null.
pub fn slice_value(
    list: &CypherValue,
    from: Option<&CypherValue>,
    to: Option<&CypherValue>,
) -> EvalResult<CypherValue> {
    let items = match list {
        CypherValue::Null => return Ok(CypherValue::Null),
        CypherValue::List(items) => items,
        other => return Err(EvalError::type_mismatch("List", other.type_name())),
    };

    let bound = |value: Option<&CypherValue>, default: usize| -> EvalResult<Option<usize>> {
        match value {
            None => Ok(Some(default)),
            Some(CypherValue::Null) => Ok(None),
            Some(CypherValue::Integer(i)) => Ok(Some(clamp_bound(*i, items.len()))),
            Some(other) => Err(EvalError::type_mismatch("Integer", other.type_name())),
        }
    };

    let (Some(start), Some(end)) = (bound(from, 0)?, bound(to, items.len())?) else {
        return Ok(CypherValue::Null);
    };

    if start >= end {
        return Ok(CypherValue::List(Vec::new()));
    }
    Ok(CypherValue::List(items[start..end].to_vec()))
}
