//! Aggregate functions
//!
//! Each receives the collected column as a list in its first argument. Null
//! entries are ignored.

use crate::error::{EvalError, EvalResult};
use crate::operators::cypher_compare;
use cypher_types::CypherValue;
use std::cmp::Ordering;

/// Non-null entries of the collected column
fn column<'a>(
    name: &str,
    args: &'a [CypherValue],
) -> EvalResult<impl Iterator<Item = &'a CypherValue>> {
    match args.first() {
        Some(CypherValue::List(items)) => Ok(items.iter().filter(|v| !v.is_null())),
        Some(other) => Err(EvalError::type_mismatch("List", other.type_name())),
        None => Err(EvalError::invocation(name, "missing aggregated column")),
    }
}

pub(super) fn count(args: &[CypherValue]) -> EvalResult<CypherValue> {
    let n = column("count", args)?.count();
    i64::try_from(n)
        .map(CypherValue::Integer)
        .map_err(|_| EvalError::overflow("count"))
}

pub(super) fn collect(args: &[CypherValue]) -> EvalResult<CypherValue> {
    Ok(CypherValue::list(column("collect", args)?.cloned()))
}

/// Sum of numbers: Integer while every value is an Integer, Float otherwise.
/// An empty column sums to `0`.
pub(super) fn sum(args: &[CypherValue]) -> EvalResult<CypherValue> {
    let mut total = CypherValue::Integer(0);
    for value in column("sum", args)? {
        total = match (&total, value) {
            (CypherValue::Integer(a), CypherValue::Integer(b)) => a
                .checked_add(*b)
                .map(CypherValue::Integer)
                .ok_or_else(|| EvalError::overflow("sum"))?,
            (acc, v) => match (acc.as_float(), v.as_float()) {
                (Some(a), Some(b)) => CypherValue::Float(a + b),
                _ => return Err(EvalError::type_mismatch("Integer or Float", v.type_name())),
            },
        };
    }
    Ok(total)
}

/// Arithmetic mean as a Float, null for an empty column
pub(super) fn avg(args: &[CypherValue]) -> EvalResult<CypherValue> {
    let mut total = 0.0;
    let mut n = 0u64;
    for value in column("avg", args)? {
        let x = value
            .as_float()
            .ok_or_else(|| EvalError::type_mismatch("Integer or Float", value.type_name()))?;
        total += x;
        n += 1;
    }
    Ok(if n == 0 {
        CypherValue::Null
    } else {
        CypherValue::Float(total / n as f64)
    })
}

fn extreme(name: &str, args: &[CypherValue], keep: Ordering) -> EvalResult<CypherValue> {
    let mut best: Option<&CypherValue> = None;
    for value in column(name, args)? {
        best = match best {
            None => Some(value),
            Some(current) => match cypher_compare(value, current) {
                Some(ord) if ord == keep => Some(value),
                Some(_) => Some(current),
                None => {
                    return Err(EvalError::invocation(
                        name,
                        format!(
                            "cannot compare {} with {}",
                            value.type_name(),
                            current.type_name()
                        ),
                    ));
                }
            },
        };
    }
    Ok(best.cloned().unwrap_or(CypherValue::Null))
}

pub(super) fn min(args: &[CypherValue]) -> EvalResult<CypherValue> {
    extreme("min", args, Ordering::Less)
}

pub(super) fn max(args: &[CypherValue]) -> EvalResult<CypherValue> {
    extreme("max", args, Ordering::Greater)
}
