//! Arithmetic Operators for Cypher
//!
//! Implements: Add, Subtract, Multiply, Divide, Modulo, Power, Negate.
//!
//! A null operand yields null. Integer arithmetic is checked; Integer op
//! Float promotes to Float. `+` also concatenates strings and lists, and both
//! `+` and `-` shift temporal values by durations.

use crate::error::{EvalError, EvalResult};
use cypher_types::{CypherDuration, CypherValue};

fn unsupported_pair(op: &str, left: &CypherValue, right: &CypherValue) -> EvalError {
    EvalError::type_mismatch(
        format!("operands supported by {op}"),
        format!("{}, {}", left.type_name(), right.type_name()),
    )
}

/// Both operands as floats, when at least one is a Float and both are numbers
fn promoted(left: &CypherValue, right: &CypherValue) -> Option<(f64, f64)> {
    match (left, right) {
        (CypherValue::Integer(_), CypherValue::Integer(_)) => None,
        _ => Some((left.as_float()?, right.as_float()?)),
    }
}

// =========================================================================
// Binary Arithmetic
// =========================================================================

/// Evaluate `+`
pub fn add(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    if left.is_null() || right.is_null() {
        return Ok(CypherValue::Null);
    }

    match (left, right) {
        // Integer + Integer -> Integer
        (CypherValue::Integer(a), CypherValue::Integer(b)) => a
            .checked_add(*b)
            .map(CypherValue::Integer)
            .ok_or_else(|| EvalError::overflow("+")),

        // String concatenation, stringifying the other side
        (CypherValue::String(a), b) => Ok(CypherValue::String(format!(
            "{a}{}",
            b.to_plain_string()
        ))),

        // List concatenation, append and prepend
        (CypherValue::List(a), CypherValue::List(b)) => {
            Ok(CypherValue::List(a.iter().chain(b).cloned().collect()))
        }
        (CypherValue::List(a), item) => {
            let mut items = a.clone();
            items.push(item.clone());
            Ok(CypherValue::List(items))
        }
        (item, CypherValue::List(b)) => {
            let mut items = Vec::with_capacity(b.len() + 1);
            items.push(item.clone());
            items.extend(b.iter().cloned());
            Ok(CypherValue::List(items))
        }

        (a, CypherValue::String(b)) => Ok(CypherValue::String(format!(
            "{}{b}",
            a.to_plain_string()
        ))),

        (CypherValue::Duration(a), CypherValue::Duration(b)) => a
            .checked_add(b)
            .map(CypherValue::Duration)
            .ok_or_else(|| EvalError::overflow("+")),
        (point, CypherValue::Duration(d)) | (CypherValue::Duration(d), point)
            if is_temporal_point(point) =>
        {
            shift(point, d).ok_or_else(|| EvalError::overflow("+"))
        }

        _ => match promoted(left, right) {
            Some((a, b)) => Ok(CypherValue::Float(a + b)),
            None => Err(unsupported_pair("+", left, right)),
        },
    }
}

/// Evaluate `-`
pub fn subtract(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    if left.is_null() || right.is_null() {
        return Ok(CypherValue::Null);
    }

    match (left, right) {
        (CypherValue::Integer(a), CypherValue::Integer(b)) => a
            .checked_sub(*b)
            .map(CypherValue::Integer)
            .ok_or_else(|| EvalError::overflow("-")),

        (CypherValue::Duration(a), CypherValue::Duration(b)) => a
            .checked_sub(b)
            .map(CypherValue::Duration)
            .ok_or_else(|| EvalError::overflow("-")),
        (point, CypherValue::Duration(d)) if is_temporal_point(point) => d
            .checked_neg()
            .and_then(|neg| shift(point, &neg))
            .ok_or_else(|| EvalError::overflow("-")),

        _ => match promoted(left, right) {
            Some((a, b)) => Ok(CypherValue::Float(a - b)),
            None => Err(unsupported_pair("-", left, right)),
        },
    }
}

/// Evaluate `*`
pub fn multiply(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    if left.is_null() || right.is_null() {
        return Ok(CypherValue::Null);
    }

    match (left, right) {
        (CypherValue::Integer(a), CypherValue::Integer(b)) => a
            .checked_mul(*b)
            .map(CypherValue::Integer)
            .ok_or_else(|| EvalError::overflow("*")),

        (CypherValue::Duration(d), CypherValue::Integer(n))
        | (CypherValue::Integer(n), CypherValue::Duration(d)) => d
            .checked_mul(*n)
            .map(CypherValue::Duration)
            .ok_or_else(|| EvalError::overflow("*")),

        _ => match promoted(left, right) {
            Some((a, b)) => Ok(CypherValue::Float(a * b)),
            None => Err(unsupported_pair("*", left, right)),
        },
    }
}

/// Evaluate `/`
///
/// Integer division truncates toward zero; Float division follows IEEE 754.
pub fn divide(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    if left.is_null() || right.is_null() {
        return Ok(CypherValue::Null);
    }

    match (left, right) {
        (CypherValue::Integer(_), CypherValue::Integer(0)) => Err(EvalError::DivisionByZero),
        (CypherValue::Integer(a), CypherValue::Integer(b)) => a
            .checked_div(*b)
            .map(CypherValue::Integer)
            .ok_or_else(|| EvalError::overflow("/")),

        (CypherValue::Duration(_), CypherValue::Integer(0)) => Err(EvalError::DivisionByZero),
        (CypherValue::Duration(d), CypherValue::Integer(n)) => d
            .checked_div(*n)
            .map(CypherValue::Duration)
            .ok_or_else(|| EvalError::overflow("/")),

        _ => match promoted(left, right) {
            Some((a, b)) => Ok(CypherValue::Float(a / b)),
            None => Err(unsupported_pair("/", left, right)),
        },
    }
}

/// Evaluate `%`, defined for Integer operands only
pub fn modulo(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    if left.is_null() || right.is_null() {
        return Ok(CypherValue::Null);
    }

    match (left, right) {
        (CypherValue::Integer(_), CypherValue::Integer(0)) => Err(EvalError::DivisionByZero),
        (CypherValue::Integer(a), CypherValue::Integer(b)) => a
            .checked_rem(*b)
            .map(CypherValue::Integer)
            .ok_or_else(|| EvalError::overflow("%")),
        _ => Err(unsupported_pair("%", left, right)),
    }
}

/// Evaluate `^`, always a Float
pub fn power(left: &CypherValue, right: &CypherValue) -> EvalResult<CypherValue> {
    if left.is_null() || right.is_null() {
        return Ok(CypherValue::Null);
    }

    match (left.as_float(), right.as_float()) {
        (Some(base), Some(exponent)) => Ok(CypherValue::Float(base.powf(exponent))),
        _ => Err(unsupported_pair("^", left, right)),
    }
}

// =========================================================================
// Unary Arithmetic
// =========================================================================

/// Evaluate unary `-`
pub fn negate(operand: &CypherValue) -> EvalResult<CypherValue> {
    match operand {
        CypherValue::Null => Ok(CypherValue::Null),
        CypherValue::Integer(i) => i
            .checked_neg()
            .map(CypherValue::Integer)
            .ok_or_else(|| EvalError::overflow("negation")),
        CypherValue::Float(f) => Ok(CypherValue::Float(-f)),
        CypherValue::Duration(d) => d
            .checked_neg()
            .map(CypherValue::Duration)
            .ok_or_else(|| EvalError::overflow("negation")),
        other => Err(EvalError::type_mismatch("Integer, Float or Duration", other.type_name())),
    }
}

// =========================================================================
// Temporal helpers
// =========================================================================

fn is_temporal_point(value: &CypherValue) -> bool {
    matches!(
        value,
        CypherValue::Date(_)
            | CypherValue::Time(_)
            | CypherValue::LocalDateTime(_)
            | CypherValue::DateTime(_)
    )
}

/// Shift a temporal point by a duration, `None` on calendar overflow
fn shift(point: &CypherValue, duration: &CypherDuration) -> Option<CypherValue> {
    match point {
        CypherValue::Date(d) => duration.add_to_date(*d).map(CypherValue::Date),
        CypherValue::Time(t) => duration.add_to_time(*t).map(CypherValue::Time),
        CypherValue::LocalDateTime(dt) => duration
            .add_to_local_datetime(*dt)
            .map(CypherValue::LocalDateTime),
        CypherValue::DateTime(dt) => duration.add_to_datetime(*dt).map(CypherValue::DateTime),
        _ => None,
    }
}
