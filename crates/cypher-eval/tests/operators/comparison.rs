//! Comparison Operator Tests
//!
//! Tests for: =, <>, <, <=, >, >=
//! Structural equality per variant, list/map/entity content equality, exact
//! mixed numeric ordering and null propagation.

use chrono::NaiveDate;
use cypher_ast::{BinaryOp, Expression};
use cypher_eval::{BindingContext, CypherEngine, cypher_compare, cypher_equal};
use cypher_types::{CypherNode, CypherValue};
use rstest::rstest;
use std::cmp::Ordering;

// ============================================================================
// Test Helpers
// ============================================================================

fn engine() -> CypherEngine {
    CypherEngine::new()
}

fn int_expr(i: i64) -> Expression {
    Expression::literal(i)
}

fn compare(op: BinaryOp, left: CypherValue, right: CypherValue) -> CypherValue {
    let ctx = BindingContext::builder()
        .binding("l", left)
        .binding("r", right)
        .build();
    engine()
        .evaluate(
            &Expression::binary(op, Expression::var("l"), Expression::var("r")),
            &ctx,
        )
        .unwrap()
}

fn int_list(values: &[i64]) -> CypherValue {
    CypherValue::list(values.iter().copied().map(CypherValue::Integer))
}

// ============================================================================
// Equality
// ============================================================================

#[rstest]
#[case(CypherValue::Integer(1), CypherValue::Integer(1), CypherValue::Boolean(true))]
#[case(CypherValue::Integer(1), CypherValue::Float(1.0), CypherValue::Boolean(false))]
#[case(CypherValue::Float(1.0), CypherValue::Float(1.0), CypherValue::Boolean(true))]
#[case(CypherValue::Float(1.5), CypherValue::Integer(1), CypherValue::Boolean(false))]
#[case(CypherValue::from("a"), CypherValue::from("a"), CypherValue::Boolean(true))]
#[case(CypherValue::from("1"), CypherValue::Integer(1), CypherValue::Boolean(false))]
#[case(CypherValue::Null, CypherValue::Integer(1), CypherValue::Null)]
#[case(CypherValue::Null, CypherValue::Null, CypherValue::Null)]
fn test_equal(#[case] left: CypherValue, #[case] right: CypherValue, #[case] expected: CypherValue) {
    assert_eq!(compare(BinaryOp::Equal, left, right), expected);
}

#[test]
fn test_not_equal() {
    assert_eq!(
        compare(BinaryOp::NotEqual, CypherValue::Integer(1), CypherValue::Integer(2)),
        CypherValue::Boolean(true)
    );
    assert_eq!(
        compare(BinaryOp::NotEqual, CypherValue::Integer(1), CypherValue::Null),
        CypherValue::Null
    );
}

#[test]
fn test_list_equality_with_nested_null() {
    let with_null = CypherValue::list([1i64.into(), CypherValue::Null]);
    // [1, null] = [1, null]
    assert_eq!(
        compare(BinaryOp::Equal, with_null.clone(), with_null.clone()),
        CypherValue::Boolean(true)
    );
    // [1, null] = [1, 2]
    assert_eq!(cypher_equal(&with_null, &int_list(&[1, 2])), Some(false));
    // Length mismatch is false
    assert_eq!(cypher_equal(&int_list(&[1]), &int_list(&[1, 2])), Some(false));
    // Elements keep their variant
    let floats = CypherValue::list([CypherValue::Float(1.0), CypherValue::Float(2.0)]);
    assert_eq!(cypher_equal(&int_list(&[1, 2]), &floats), Some(false));
}

#[test]
fn test_map_equality_ignores_order() {
    let a = CypherValue::map([("x", CypherValue::Integer(1)), ("y", CypherValue::Integer(2))]);
    let b = CypherValue::map([("y", CypherValue::Integer(2)), ("x", CypherValue::Integer(1))]);
    let c = CypherValue::map([("y", CypherValue::Float(2.0)), ("x", CypherValue::Integer(1))]);
    assert_eq!(cypher_equal(&a, &b), Some(true));
    assert_eq!(cypher_equal(&a, &c), Some(false));
}

#[test]
fn test_nodes_compare_by_content() {
    let a = CypherValue::Node(CypherNode::new(1).with_property("name", "a"));
    let b = CypherValue::Node(CypherNode::new(1).with_property("name", "b"));
    let c = CypherValue::Node(CypherNode::new(2));
    assert_eq!(cypher_equal(&a, &a.clone()), Some(true));
    assert_eq!(cypher_equal(&a, &b), Some(false));
    assert_eq!(cypher_equal(&a, &c), Some(false));
}

#[test]
fn test_in_uses_structural_equality() {
    let expr = Expression::binary(
        BinaryOp::In,
        Expression::var("l"),
        Expression::var("r"),
    );
    let ctx = BindingContext::builder()
        .binding("l", 1i64)
        .binding("r", CypherValue::list([CypherValue::Float(1.0)]))
        .build();
    assert_eq!(
        engine().evaluate(&expr, &ctx).unwrap(),
        CypherValue::Boolean(false)
    );
}

// ============================================================================
// Ordering
// ============================================================================

#[rstest]
#[case(BinaryOp::LessThan, 1, 2, true)]
#[case(BinaryOp::LessThan, 2, 2, false)]
#[case(BinaryOp::LessThanOrEqual, 2, 2, true)]
#[case(BinaryOp::GreaterThan, 3, 2, true)]
#[case(BinaryOp::GreaterThanOrEqual, 1, 2, false)]
fn test_integer_ordering(
    #[case] op: BinaryOp,
    #[case] left: i64,
    #[case] right: i64,
    #[case] expected: bool,
) {
    let expr = Expression::binary(op, int_expr(left), int_expr(right));
    let result = engine().evaluate(&expr, &BindingContext::new()).unwrap();
    assert_eq!(result, CypherValue::Boolean(expected));
}

#[test]
fn test_mixed_numeric_ordering() {
    assert_eq!(
        compare(BinaryOp::LessThan, CypherValue::Integer(1), CypherValue::Float(1.5)),
        CypherValue::Boolean(true)
    );
}

#[test]
fn test_mixed_numeric_ordering_is_exact() {
    // 2^53 + 1 against 2^53, which rounds to equal through f64
    assert_eq!(
        compare(
            BinaryOp::GreaterThan,
            CypherValue::Integer(9_007_199_254_740_993),
            CypherValue::Float(9_007_199_254_740_992.0)
        ),
        CypherValue::Boolean(true)
    );
}

#[test]
fn test_string_ordering() {
    assert_eq!(
        compare(BinaryOp::LessThan, "apple".into(), "banana".into()),
        CypherValue::Boolean(true)
    );
}

#[test]
fn test_incomparable_types_are_null() {
    // 'a' > 1
    assert_eq!(
        compare(BinaryOp::GreaterThan, "a".into(), CypherValue::Integer(1)),
        CypherValue::Null
    );
    assert_eq!(
        compare(BinaryOp::LessThan, CypherValue::Boolean(true), CypherValue::Integer(1)),
        CypherValue::Null
    );
}

#[test]
fn test_null_ordering_is_null() {
    assert_eq!(
        compare(BinaryOp::GreaterThanOrEqual, CypherValue::Null, CypherValue::Integer(1)),
        CypherValue::Null
    );
}

#[test]
fn test_date_ordering() {
    let earlier = CypherValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    let later = CypherValue::Date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(cypher_compare(&earlier, &later), Some(Ordering::Less));
    assert_eq!(
        compare(BinaryOp::GreaterThan, later, earlier),
        CypherValue::Boolean(true)
    );
}

#[test]
fn test_list_ordering_is_lexicographic() {
    assert_eq!(
        cypher_compare(&int_list(&[1, 2]), &int_list(&[1, 3])),
        Some(Ordering::Less)
    );
    assert_eq!(
        cypher_compare(&int_list(&[1, 2, 0]), &int_list(&[1, 2])),
        Some(Ordering::Greater)
    );
}
