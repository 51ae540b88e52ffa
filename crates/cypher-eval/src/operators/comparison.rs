//! Comparison Operators for Cypher
//!
//! Implements: `=`, `<>`, `>`, `>=` (and `<`, `<=` by flipping operands).
//! All comparison operators implement three-valued logic (true/false/null).

use cypher_types::CypherValue;
use std::cmp::Ordering;

/// Evaluate `=`
pub fn equal(left: &CypherValue, right: &CypherValue) -> CypherValue {
    cypher_equal(left, right).map_or(CypherValue::Null, CypherValue::Boolean)
}

/// Evaluate `<>`
pub fn not_equal(left: &CypherValue, right: &CypherValue) -> CypherValue {
    cypher_equal(left, right).map_or(CypherValue::Null, |eq| CypherValue::Boolean(!eq))
}

/// Evaluate `>`
pub fn greater(left: &CypherValue, right: &CypherValue) -> CypherValue {
    match cypher_compare(left, right) {
        Some(ord) => CypherValue::Boolean(ord == Ordering::Greater),
        None => CypherValue::Null,
    }
}

/// Evaluate `>=`
pub fn greater_or_equal(left: &CypherValue, right: &CypherValue) -> CypherValue {
    match cypher_compare(left, right) {
        Some(ord) => CypherValue::Boolean(ord != Ordering::Less),
        None => CypherValue::Null,
    }
}

/// Cypher equality
///
/// `None` when either operand is null, otherwise structural equality: the
/// same variant with the same content. Maps ignore key order; nulls nested
/// inside lists or maps compare as ordinary elements.
pub fn cypher_equal(left: &CypherValue, right: &CypherValue) -> Option<bool> {
    if left.is_null() || right.is_null() {
        return None;
    }
    Some(left == right)
}

/// Cypher ordering comparison
///
/// Defined for numbers (with promotion), strings, booleans, same-variant
/// temporal points and lists (lexicographically). Everything else, including
/// any comparison involving null, is `None`.
pub fn cypher_compare(left: &CypherValue, right: &CypherValue) -> Option<Ordering> {
    match (left, right) {
        (CypherValue::Integer(a), CypherValue::Integer(b)) => Some(a.cmp(b)),
        (CypherValue::Integer(a), CypherValue::Float(b)) => compare_int_float(*a, *b),
        (CypherValue::Float(a), CypherValue::Integer(b)) => {
            compare_int_float(*b, *a).map(Ordering::reverse)
        }
        (CypherValue::Float(a), CypherValue::Float(b)) => a.partial_cmp(b),

        (CypherValue::String(a), CypherValue::String(b)) => Some(a.cmp(b)),
        (CypherValue::Boolean(a), CypherValue::Boolean(b)) => Some(a.cmp(b)),

        (CypherValue::Date(a), CypherValue::Date(b)) => Some(a.cmp(b)),
        (CypherValue::Time(a), CypherValue::Time(b)) => Some(a.cmp(b)),
        (CypherValue::LocalDateTime(a), CypherValue::LocalDateTime(b)) => Some(a.cmp(b)),
        (CypherValue::DateTime(a), CypherValue::DateTime(b)) => Some(a.cmp(b)),

        (CypherValue::List(a), CypherValue::List(b)) => {
            for (x, y) in a.iter().zip(b) {
                match cypher_compare(x, y)? {
                    Ordering::Equal => {}
                    other => return Some(other),
                }
            }
            Some(a.len().cmp(&b.len()))
        }

        _ => None,
    }
}

/// Exact ordering of an integer against a float, without rounding the
/// integer through `f64`
fn compare_int_float(int: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    // i64 range is [-2^63, 2^63)
    if float >= 9_223_372_036_854_775_808.0 {
        return Some(Ordering::Less);
    }
    if float < -9_223_372_036_854_775_808.0 {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        other => Some(other),
    }
}
