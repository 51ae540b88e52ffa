//! List Operator Tests
//!
//! Tests for: IN, subscripts, slices and list literals

use cypher_ast::{BinaryOp, Expression};
use cypher_eval::{BindingContext, CypherEngine, EvalError};
use cypher_types::{CypherNode, CypherValue};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ============================================================================
// Test Helpers
// ============================================================================

fn engine() -> CypherEngine {
    CypherEngine::new()
}

fn ctx() -> BindingContext {
    BindingContext::builder()
        .binding("l", int_list(&[1, 2, 3]))
        .binding("empty", CypherValue::List(vec![]))
        .binding("m", CypherValue::map([("k", CypherValue::from("v"))]))
        .build()
}

fn int_expr(i: i64) -> Expression {
    Expression::literal(i)
}

fn int_list(values: &[i64]) -> CypherValue {
    CypherValue::list(values.iter().copied().map(CypherValue::Integer))
}

fn eval(expr: &Expression) -> Result<CypherValue, EvalError> {
    engine().evaluate(expr, &ctx())
}

// ============================================================================
// IN
// ============================================================================

#[rstest]
#[case(int_expr(2), int_list(&[1, 2, 3]), CypherValue::Boolean(true))]
#[case(int_expr(5), int_list(&[1, 2, 3]), CypherValue::Boolean(false))]
#[case(int_expr(5), CypherValue::list([1i64.into(), CypherValue::Null]), CypherValue::Null)]
#[case(int_expr(1), CypherValue::list([1i64.into(), CypherValue::Null]), CypherValue::Boolean(true))]
#[case(Expression::null(), int_list(&[1]), CypherValue::Null)]
#[case(Expression::null(), CypherValue::List(vec![]), CypherValue::Boolean(false))]
#[case(int_expr(1), CypherValue::Null, CypherValue::Null)]
fn test_in(#[case] item: Expression, #[case] list: CypherValue, #[case] expected: CypherValue) {
    let ctx = BindingContext::builder().binding("list", list).build();
    let expr = Expression::binary(BinaryOp::In, item, Expression::var("list"));
    assert_eq!(engine().evaluate(&expr, &ctx).unwrap(), expected);
}

#[test]
fn test_in_nested_list() {
    let expr = Expression::binary(
        BinaryOp::In,
        Expression::List(vec![int_expr(1)]),
        Expression::List(vec![Expression::List(vec![int_expr(1)]), int_expr(2)]),
    );
    assert_eq!(eval(&expr).unwrap(), CypherValue::Boolean(true));
}

#[test]
fn test_in_non_list_is_type_error() {
    let expr = Expression::binary(BinaryOp::In, int_expr(1), int_expr(1));
    let err = eval(&expr).unwrap_err();
    assert!(matches!(err.root(), EvalError::TypeMismatch { .. }));
}

// ============================================================================
// Subscripts
// ============================================================================

#[rstest]
#[case(0, CypherValue::Integer(1))]
#[case(2, CypherValue::Integer(3))]
#[case(-1, CypherValue::Integer(3))]
#[case(-3, CypherValue::Integer(1))]
#[case(3, CypherValue::Null)]
#[case(-4, CypherValue::Null)]
fn test_list_index(#[case] index: i64, #[case] expected: CypherValue) {
    let expr = Expression::var("l").index(int_expr(index));
    assert_eq!(eval(&expr).unwrap(), expected);
}

#[test]
fn test_index_into_empty_list() {
    let expr = Expression::var("empty").index(int_expr(0));
    assert_eq!(eval(&expr).unwrap(), CypherValue::Null);
}

#[test]
fn test_null_index() {
    let expr = Expression::var("l").index(Expression::null());
    assert_eq!(eval(&expr).unwrap(), CypherValue::Null);
}

#[test]
fn test_map_key_subscript() {
    let present = Expression::var("m").index(Expression::literal("k"));
    let absent = Expression::var("m").index(Expression::literal("other"));
    assert_eq!(eval(&present).unwrap(), CypherValue::from("v"));
    assert_eq!(eval(&absent).unwrap(), CypherValue::Null);
}

#[test]
fn test_node_key_subscript() {
    let ctx = BindingContext::builder()
        .binding("n", CypherNode::new(1).with_property("age", 30i64))
        .build();
    let expr = Expression::var("n").index(Expression::literal("age"));
    assert_eq!(engine().evaluate(&expr, &ctx).unwrap(), CypherValue::Integer(30));
}

#[test]
fn test_list_string_subscript_is_type_error() {
    let expr = Expression::var("l").index(Expression::literal("k"));
    let err = eval(&expr).unwrap_err();
    assert!(matches!(err.root(), EvalError::TypeMismatch { .. }));
}

// ============================================================================
// Slices
// ============================================================================

#[rstest]
#[case(Some(1), Some(-1), &[2])]
#[case(Some(0), Some(2), &[1, 2])]
#[case(None, Some(2), &[1, 2])]
#[case(Some(1), None, &[2, 3])]
#[case(Some(-2), None, &[2, 3])]
#[case(Some(0), Some(10), &[1, 2, 3])]
#[case(Some(2), Some(1), &[])]
fn test_slice(#[case] from: Option<i64>, #[case] to: Option<i64>, #[case] expected: &[i64]) {
    let expr = Expression::var("l").slice(from.map(int_expr), to.map(int_expr));
    assert_eq!(eval(&expr).unwrap(), int_list(expected));
}

#[test]
fn test_slice_with_null_bound() {
    let expr = Expression::var("l").slice(Some(Expression::null()), None);
    assert_eq!(eval(&expr).unwrap(), CypherValue::Null);
}

#[test]
fn test_slice_of_null() {
    let expr = Expression::null().slice(Some(int_expr(0)), None);
    assert_eq!(eval(&expr).unwrap(), CypherValue::Null);
}

// ============================================================================
// List literals
// ============================================================================

#[test]
fn test_list_literal_keeps_nulls() {
    let expr = Expression::List(vec![int_expr(1), Expression::null(), Expression::literal("a")]);
    assert_eq!(
        eval(&expr).unwrap(),
        CypherValue::list([1i64.into(), CypherValue::Null, "a".into()])
    );
}
