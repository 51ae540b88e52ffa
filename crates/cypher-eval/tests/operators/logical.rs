//! Logical Operator Tests
//!
//! Tests for: AND, OR, XOR, NOT, IS NULL, IS NOT NULL and the planner's
//! multi-operand Ands/Ors. All operators implement three-valued logic.

use cypher_ast::{BinaryOp, Expression, UnaryOp};
use cypher_eval::{BindingContext, CypherEngine, EvalError};
use cypher_types::CypherValue;
use rstest::rstest;

// ============================================================================
// Test Helpers
// ============================================================================

fn engine() -> CypherEngine {
    CypherEngine::new()
}

fn ctx() -> BindingContext {
    BindingContext::new()
}

/// `Some(b)` is a boolean literal, `None` is null
fn tri_expr(value: Option<bool>) -> Expression {
    match value {
        Some(b) => Expression::literal(b),
        None => Expression::null(),
    }
}

fn tri_value(value: Option<bool>) -> CypherValue {
    value.map_or(CypherValue::Null, CypherValue::Boolean)
}

fn eval(expr: &Expression) -> CypherValue {
    engine().evaluate(expr, &ctx()).unwrap()
}

// ============================================================================
// AND / OR / XOR - Three-Valued Logic
// ============================================================================

/// And Truth Table:
/// | A     | B     | A AND B |
/// |-------|-------|---------|
/// | true  | true  | true    |
/// | true  | false | false   |
/// | true  | null  | null    |
/// | false | null  | false   | <- false dominates null
/// | null  | false | false   | <- false dominates null
/// | null  | null  | null    |
#[rstest]
#[case(Some(true), Some(true), Some(true))]
#[case(Some(true), Some(false), Some(false))]
#[case(Some(true), None, None)]
#[case(Some(false), Some(true), Some(false))]
#[case(Some(false), Some(false), Some(false))]
#[case(Some(false), None, Some(false))]
#[case(None, Some(true), None)]
#[case(None, Some(false), Some(false))]
#[case(None, None, None)]
fn test_and_truth_table(
    #[case] a: Option<bool>,
    #[case] b: Option<bool>,
    #[case] expected: Option<bool>,
) {
    let expr = Expression::binary(BinaryOp::And, tri_expr(a), tri_expr(b));
    assert_eq!(eval(&expr), tri_value(expected));
}

/// Or Truth Table:
/// | A     | B     | A OR B |
/// |-------|-------|--------|
/// | true  | null  | true   | <- true dominates null
/// | false | null  | null   |
/// | null  | true  | true   | <- true dominates null
/// | null  | null  | null   |
#[rstest]
#[case(Some(true), Some(true), Some(true))]
#[case(Some(true), Some(false), Some(true))]
#[case(Some(true), None, Some(true))]
#[case(Some(false), Some(true), Some(true))]
#[case(Some(false), Some(false), Some(false))]
#[case(Some(false), None, None)]
#[case(None, Some(true), Some(true))]
#[case(None, Some(false), None)]
#[case(None, None, None)]
fn test_or_truth_table(
    #[case] a: Option<bool>,
    #[case] b: Option<bool>,
    #[case] expected: Option<bool>,
) {
    let expr = Expression::binary(BinaryOp::Or, tri_expr(a), tri_expr(b));
    assert_eq!(eval(&expr), tri_value(expected));
}

#[rstest]
#[case(Some(true), Some(true), Some(false))]
#[case(Some(true), Some(false), Some(true))]
#[case(Some(false), Some(false), Some(false))]
#[case(Some(true), None, None)]
#[case(None, Some(false), None)]
fn test_xor_truth_table(
    #[case] a: Option<bool>,
    #[case] b: Option<bool>,
    #[case] expected: Option<bool>,
) {
    let expr = Expression::binary(BinaryOp::Xor, tri_expr(a), tri_expr(b));
    assert_eq!(eval(&expr), tri_value(expected));
}

// ============================================================================
// NOT / IS NULL
// ============================================================================

#[test]
fn test_not_true() {
    let expr = Expression::unary(UnaryOp::Not, tri_expr(Some(true)));
    assert_eq!(eval(&expr), CypherValue::Boolean(false));
}

#[test]
fn test_not_null() {
    let expr = Expression::unary(UnaryOp::Not, Expression::null());
    assert_eq!(eval(&expr), CypherValue::Null);
}

#[test]
fn test_not_integer_is_type_error() {
    let expr = Expression::unary(UnaryOp::Not, Expression::literal(1i64));
    let err = engine().evaluate(&expr, &ctx()).unwrap_err();
    assert!(matches!(err.root(), EvalError::TypeMismatch { .. }));
}

#[test]
fn test_is_null() {
    let is_null = Expression::unary(UnaryOp::IsNull, Expression::null());
    let is_not_null = Expression::unary(UnaryOp::IsNotNull, Expression::literal(0i64));
    assert_eq!(eval(&is_null), CypherValue::Boolean(true));
    assert_eq!(eval(&is_not_null), CypherValue::Boolean(true));
}

// ============================================================================
// Ands / Ors - truthiness
// ============================================================================

#[test]
fn test_ands_all_truthy() {
    let expr = Expression::Ands(vec![
        tri_expr(Some(true)),
        Expression::List(vec![Expression::literal(1i64)]),
    ]);
    assert_eq!(eval(&expr), CypherValue::Boolean(true));
}

#[test]
fn test_ands_null_is_not_truthy() {
    let expr = Expression::Ands(vec![tri_expr(Some(true)), Expression::null()]);
    assert_eq!(eval(&expr), CypherValue::Boolean(false));
}

#[test]
fn test_ands_empty_list_is_falsy() {
    let expr = Expression::Ands(vec![Expression::List(vec![])]);
    assert_eq!(eval(&expr), CypherValue::Boolean(false));
}

#[test]
fn test_ors_any_truthy() {
    let expr = Expression::Ors(vec![
        Expression::null(),
        tri_expr(Some(false)),
        tri_expr(Some(true)),
    ]);
    assert_eq!(eval(&expr), CypherValue::Boolean(true));
}

#[test]
fn test_ors_stops_at_first_truthy() {
    // The second operand would fail on an unbound variable
    let expr = Expression::Ors(vec![tri_expr(Some(true)), Expression::var("missing")]);
    assert_eq!(eval(&expr), CypherValue::Boolean(true));
}

#[test]
fn test_ands_rejects_non_boolean() {
    let expr = Expression::Ands(vec![Expression::literal("yes")]);
    let err = engine().evaluate(&expr, &ctx()).unwrap_err();
    assert!(matches!(err.root(), EvalError::TypeMismatch { .. }));
}
