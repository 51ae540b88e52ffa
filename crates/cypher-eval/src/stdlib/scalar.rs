//! Scalar functions

use super::single;
use crate::error::{EvalError, EvalResult};
use cypher_types::CypherValue;

// === Lists ===

pub(super) fn size(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("size", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::List(items) => Ok(CypherValue::Integer(count(items.len()))),
        CypherValue::String(s) => Ok(CypherValue::Integer(count(s.chars().count()))),
        other => Err(EvalError::type_mismatch("List or String", other.type_name())),
    }
}

pub(super) fn length(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("length", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::Path(path) => Ok(CypherValue::Integer(count(path.length()))),
        CypherValue::List(items) => Ok(CypherValue::Integer(count(items.len()))),
        CypherValue::String(s) => Ok(CypherValue::Integer(count(s.chars().count()))),
        other => Err(EvalError::type_mismatch("Path", other.type_name())),
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn list_arg<'a>(name: &str, args: &'a [CypherValue]) -> EvalResult<Option<&'a [CypherValue]>> {
    match single(name, args)? {
        CypherValue::Null => Ok(None),
        CypherValue::List(items) => Ok(Some(items)),
        other => Err(EvalError::type_mismatch("List", other.type_name())),
    }
}

pub(super) fn head(args: &[CypherValue]) -> EvalResult<CypherValue> {
    Ok(list_arg("head", args)?
        .and_then(<[_]>::first)
        .cloned()
        .unwrap_or(CypherValue::Null))
}

pub(super) fn last(args: &[CypherValue]) -> EvalResult<CypherValue> {
    Ok(list_arg("last", args)?
        .and_then(<[_]>::last)
        .cloned()
        .unwrap_or(CypherValue::Null))
}

pub(super) fn tail(args: &[CypherValue]) -> EvalResult<CypherValue> {
    Ok(match list_arg("tail", args)? {
        None => CypherValue::Null,
        Some(items) => CypherValue::List(items.iter().skip(1).cloned().collect()),
    })
}

pub(super) fn reverse(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("reverse", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::List(items) => Ok(CypherValue::List(items.iter().rev().cloned().collect())),
        CypherValue::String(s) => Ok(CypherValue::String(s.chars().rev().collect())),
        other => Err(EvalError::type_mismatch("List or String", other.type_name())),
    }
}

/// `range(start, end [, step])`, inclusive of `end`
pub(super) fn range(args: &[CypherValue]) -> EvalResult<CypherValue> {
    let (start, end, step) = match args {
        [start, end] => (start, end, None),
        [start, end, step] => (start, end, Some(step)),
        _ => {
            return Err(EvalError::invocation(
                "range",
                format!("expected 2 to 3 arguments, got {}", args.len()),
            ));
        }
    };
    if start.is_null() || end.is_null() || step.is_some_and(CypherValue::is_null) {
        return Ok(CypherValue::Null);
    }
    let start = start.expect_integer()?;
    let end = end.expect_integer()?;
    let step = step.map(CypherValue::expect_integer).transpose()?.unwrap_or(1);
    if step == 0 {
        return Err(EvalError::invocation("range", "step must not be zero"));
    }

    let mut values = Vec::new();
    let mut current = Some(start);
    while let Some(value) = current {
        if (step > 0 && value > end) || (step < 0 && value < end) {
            break;
        }
        values.push(CypherValue::Integer(value));
        current = value.checked_add(step);
    }
    Ok(CypherValue::List(values))
}

// === Graph entities ===

pub(super) fn keys(args: &[CypherValue]) -> EvalResult<CypherValue> {
    let properties = match single("keys", args)? {
        CypherValue::Null => return Ok(CypherValue::Null),
        CypherValue::Map(map) => map,
        CypherValue::Node(node) => &node.properties,
        CypherValue::Relationship(rel) => &rel.properties,
        other => {
            return Err(EvalError::type_mismatch(
                "Map, Node or Relationship",
                other.type_name(),
            ));
        }
    };
    Ok(CypherValue::list(properties.keys().map(CypherValue::string)))
}

pub(super) fn labels(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("labels", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::Node(node) => Ok(CypherValue::list(
            node.labels.iter().map(CypherValue::string),
        )),
        other => Err(EvalError::type_mismatch("Node", other.type_name())),
    }
}

pub(super) fn rel_type(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("type", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::Relationship(rel) => Ok(CypherValue::string(&rel.rel_type)),
        other => Err(EvalError::type_mismatch("Relationship", other.type_name())),
    }
}

pub(super) fn id(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("id", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::Node(node) => Ok(CypherValue::Integer(node.id)),
        CypherValue::Relationship(rel) => Ok(CypherValue::Integer(rel.id)),
        other => Err(EvalError::type_mismatch("Node or Relationship", other.type_name())),
    }
}

pub(super) fn properties(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("properties", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::Map(map) => Ok(CypherValue::Map(map.clone())),
        CypherValue::Node(node) => Ok(CypherValue::Map(node.properties.clone())),
        CypherValue::Relationship(rel) => Ok(CypherValue::Map(rel.properties.clone())),
        other => Err(EvalError::type_mismatch(
            "Map, Node or Relationship",
            other.type_name(),
        )),
    }
}

pub(super) fn nodes(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("nodes", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::Path(path) => Ok(CypherValue::list(
            path.nodes().iter().cloned().map(CypherValue::Node),
        )),
        other => Err(EvalError::type_mismatch("Path", other.type_name())),
    }
}

pub(super) fn relationships(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("relationships", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::Path(path) => Ok(CypherValue::list(
            path.relationships()
                .iter()
                .cloned()
                .map(CypherValue::Relationship),
        )),
        other => Err(EvalError::type_mismatch("Path", other.type_name())),
    }
}

// === Null handling ===

/// First non-null argument
pub(super) fn coalesce(args: &[CypherValue]) -> EvalResult<CypherValue> {
    Ok(args
        .iter()
        .find(|v| !v.is_null())
        .cloned()
        .unwrap_or(CypherValue::Null))
}

// === Strings and conversion ===

fn map_string(
    name: &str,
    args: &[CypherValue],
    f: impl FnOnce(&str) -> String,
) -> EvalResult<CypherValue> {
    match single(name, args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::String(s) => Ok(CypherValue::String(f(s))),
        other => Err(EvalError::type_mismatch("String", other.type_name())),
    }
}

pub(super) fn to_upper(args: &[CypherValue]) -> EvalResult<CypherValue> {
    map_string("toUpper", args, str::to_uppercase)
}

pub(super) fn to_lower(args: &[CypherValue]) -> EvalResult<CypherValue> {
    map_string("toLower", args, str::to_lowercase)
}

pub(super) fn trim(args: &[CypherValue]) -> EvalResult<CypherValue> {
    map_string("trim", args, |s| s.trim().to_string())
}

pub(super) fn to_string(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("toString", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        value @ (CypherValue::List(_)
        | CypherValue::Map(_)
        | CypherValue::Node(_)
        | CypherValue::Relationship(_)
        | CypherValue::Path(_)) => Err(EvalError::type_mismatch(
            "Boolean, number, String or temporal value",
            value.type_name(),
        )),
        value => Ok(CypherValue::String(value.to_plain_string())),
    }
}

/// Convert to Integer; unparseable strings and out of range floats give null
pub(super) fn to_integer(args: &[CypherValue]) -> EvalResult<CypherValue> {
    let value = match single("toInteger", args)? {
        CypherValue::Null => None,
        CypherValue::Integer(i) => Some(*i),
        CypherValue::Float(f) => float_to_integer(*f),
        CypherValue::Boolean(b) => Some(i64::from(*b)),
        CypherValue::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_integer))
        }
        other => {
            return Err(EvalError::type_mismatch(
                "Boolean, number or String",
                other.type_name(),
            ));
        }
    };
    Ok(value.map_or(CypherValue::Null, CypherValue::Integer))
}

fn float_to_integer(f: f64) -> Option<i64> {
    let truncated = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
        .then_some(truncated as i64)
}

/// Convert to Float; unparseable strings give null
pub(super) fn to_float(args: &[CypherValue]) -> EvalResult<CypherValue> {
    let value = match single("toFloat", args)? {
        CypherValue::Null => None,
        CypherValue::Float(f) => Some(*f),
        CypherValue::Integer(i) => Some(*i as f64),
        CypherValue::String(s) => s.trim().parse::<f64>().ok(),
        other => {
            return Err(EvalError::type_mismatch("number or String", other.type_name()));
        }
    };
    Ok(value.map_or(CypherValue::Null, CypherValue::Float))
}

// === Math ===

pub(super) fn abs(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("abs", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::Integer(i) => i
            .checked_abs()
            .map(CypherValue::Integer)
            .ok_or_else(|| EvalError::overflow("abs")),
        CypherValue::Float(f) => Ok(CypherValue::Float(f.abs())),
        other => Err(EvalError::type_mismatch("Integer or Float", other.type_name())),
    }
}

pub(super) fn sqrt(args: &[CypherValue]) -> EvalResult<CypherValue> {
    match single("sqrt", args)? {
        CypherValue::Null => Ok(CypherValue::Null),
        value => value
            .as_float()
            .map(|f| CypherValue::Float(f.sqrt()))
            .ok_or_else(|| EvalError::type_mismatch("Integer or Float", value.type_name())),
    }
}
