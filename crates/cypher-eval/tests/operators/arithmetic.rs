//! Arithmetic Operator Tests
//!
//! Tests for: Add, Subtract, Multiply, Divide, Modulo, Power, Negate,
//! including numeric promotion, null propagation, concatenation and temporal
//! arithmetic.

use chrono::{NaiveDate, NaiveTime};
use cypher_ast::{BinaryOp, Expression, UnaryOp};
use cypher_eval::{BindingContext, CypherEngine, EvalError};
use cypher_types::{CypherDuration, CypherValue};
use pretty_assertions::assert_eq;
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

fn int_expr(i: i64) -> Expression {
    Expression::literal(i)
}

fn float_expr(f: f64) -> Expression {
    Expression::literal(f)
}

fn str_expr(s: &str) -> Expression {
    Expression::literal(s)
}

fn eval_binary(op: BinaryOp, left: Expression, right: Expression) -> Result<CypherValue, EvalError> {
    engine().evaluate(&Expression::binary(op, left, right), &ctx())
}

/// Evaluate `left op right` with both operands bound as variables
fn eval_values(op: BinaryOp, left: CypherValue, right: CypherValue) -> Result<CypherValue, EvalError> {
    let ctx = BindingContext::builder()
        .binding("l", left)
        .binding("r", right)
        .build();
    engine().evaluate(
        &Expression::binary(op, Expression::var("l"), Expression::var("r")),
        &ctx,
    )
}

// ============================================================================
// Add Tests
// ============================================================================

#[test]
fn test_add_integers() {
    let result = eval_binary(BinaryOp::Add, int_expr(2), int_expr(3)).unwrap();
    assert_eq!(result, CypherValue::Integer(5));
}

#[test]
fn test_add_integer_and_float_promotes() {
    let result = eval_binary(BinaryOp::Add, int_expr(2), float_expr(0.5)).unwrap();
    assert_eq!(result, CypherValue::Float(2.5));
}

#[rstest]
#[case(Expression::null(), int_expr(1))]
#[case(int_expr(1), Expression::null())]
#[case(Expression::null(), str_expr("a"))]
fn test_add_null_absorbs(#[case] left: Expression, #[case] right: Expression) {
    assert_eq!(eval_binary(BinaryOp::Add, left, right).unwrap(), CypherValue::Null);
}

#[test]
fn test_add_overflow() {
    let err = eval_binary(BinaryOp::Add, int_expr(i64::MAX), int_expr(1)).unwrap_err();
    assert!(matches!(err.root(), EvalError::Overflow { .. }));
}

#[test]
fn test_add_strings() {
    let result = eval_binary(BinaryOp::Add, str_expr("foo"), str_expr("bar")).unwrap();
    assert_eq!(result, CypherValue::from("foobar"));
}

#[test]
fn test_add_string_and_number() {
    let result = eval_binary(BinaryOp::Add, str_expr("n = "), int_expr(3)).unwrap();
    assert_eq!(result, CypherValue::from("n = 3"));

    let result = eval_binary(BinaryOp::Add, float_expr(1.0), str_expr("!")).unwrap();
    assert_eq!(result, CypherValue::from("1.0!"));
}

#[test]
fn test_add_lists() {
    let left = Expression::List(vec![int_expr(1), int_expr(2)]);
    let right = Expression::List(vec![int_expr(3)]);
    let result = eval_binary(BinaryOp::Add, left, right).unwrap();
    assert_eq!(result, CypherValue::list([1i64.into(), 2i64.into(), 3i64.into()]));
}

#[test]
fn test_add_list_and_element() {
    let list = Expression::List(vec![int_expr(1)]);
    let appended = eval_binary(BinaryOp::Add, list.clone(), int_expr(2)).unwrap();
    let prepended = eval_binary(BinaryOp::Add, int_expr(0), list).unwrap();
    assert_eq!(appended, CypherValue::list([1i64.into(), 2i64.into()]));
    assert_eq!(prepended, CypherValue::list([0i64.into(), 1i64.into()]));
}

#[test]
fn test_add_string_and_list_stringifies() {
    let list = Expression::List(vec![int_expr(1), str_expr("b")]);
    let result = eval_binary(BinaryOp::Add, str_expr("a"), list.clone()).unwrap();
    assert_eq!(result, CypherValue::from("a[1, 'b']"));

    // A list on the left still appends
    let result = eval_binary(BinaryOp::Add, list, str_expr("c")).unwrap();
    assert_eq!(
        result,
        CypherValue::list([1i64.into(), "b".into(), "c".into()])
    );
}

#[test]
fn test_add_boolean_is_type_error() {
    let err = eval_binary(BinaryOp::Add, Expression::literal(true), int_expr(1)).unwrap_err();
    assert!(matches!(err.root(), EvalError::TypeMismatch { .. }));
}

// ============================================================================
// Temporal Tests
// ============================================================================

#[test]
fn test_date_plus_duration() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let result = eval_values(
        BinaryOp::Add,
        CypherValue::Date(date),
        CypherValue::Duration(CypherDuration::new(1, 1, 0, 0)),
    )
    .unwrap();
    // Jan 31 + 1 month clamps to Feb 29, then one day
    assert_eq!(
        result,
        CypherValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    );
}

#[test]
fn test_duration_plus_date_commutes() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    let duration = CypherValue::Duration(CypherDuration::days(3));
    let a = eval_values(BinaryOp::Add, CypherValue::Date(date), duration.clone()).unwrap();
    let b = eval_values(BinaryOp::Add, duration, CypherValue::Date(date)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_time_minus_duration_wraps() {
    let time = NaiveTime::from_hms_opt(0, 30, 0).unwrap();
    let result = eval_values(
        BinaryOp::Subtract,
        CypherValue::Time(time),
        CypherValue::Duration(CypherDuration::seconds(3600)),
    )
    .unwrap();
    assert_eq!(
        result,
        CypherValue::Time(NaiveTime::from_hms_opt(23, 30, 0).unwrap())
    );
}

#[test]
fn test_duration_arithmetic() {
    let week = CypherValue::Duration(CypherDuration::days(7));
    let doubled = eval_values(BinaryOp::Multiply, week.clone(), CypherValue::Integer(2)).unwrap();
    assert_eq!(doubled, CypherValue::Duration(CypherDuration::days(14)));

    let halved = eval_values(BinaryOp::Divide, week, CypherValue::Integer(2)).unwrap();
    assert_eq!(
        halved,
        CypherValue::Duration(CypherDuration::new(0, 3, 43_200, 0))
    );
}

#[test]
fn test_duration_minus_date_is_type_error() {
    let err = eval_values(
        BinaryOp::Subtract,
        CypherValue::Duration(CypherDuration::days(1)),
        CypherValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
    )
    .unwrap_err();
    assert!(matches!(err.root(), EvalError::TypeMismatch { .. }));
}

// ============================================================================
// Multiply / Divide / Modulo / Power Tests
// ============================================================================

#[test]
fn test_multiply() {
    assert_eq!(
        eval_binary(BinaryOp::Multiply, int_expr(6), int_expr(7)).unwrap(),
        CypherValue::Integer(42)
    );
    assert_eq!(
        eval_binary(BinaryOp::Multiply, Expression::null(), int_expr(7)).unwrap(),
        CypherValue::Null
    );
}

#[test]
fn test_divide_integers_truncates() {
    assert_eq!(
        eval_binary(BinaryOp::Divide, int_expr(7), int_expr(2)).unwrap(),
        CypherValue::Integer(3)
    );
    assert_eq!(
        eval_binary(BinaryOp::Divide, int_expr(-7), int_expr(2)).unwrap(),
        CypherValue::Integer(-3)
    );
}

#[test]
fn test_divide_integer_by_zero() {
    let err = eval_binary(BinaryOp::Divide, int_expr(1), int_expr(0)).unwrap_err();
    assert_eq!(err.root(), &EvalError::DivisionByZero);
}

#[test]
fn test_divide_float_by_zero_is_infinite() {
    let result = eval_binary(BinaryOp::Divide, float_expr(1.0), int_expr(0)).unwrap();
    assert_eq!(result, CypherValue::Float(f64::INFINITY));
}

#[test]
fn test_modulo() {
    assert_eq!(
        eval_binary(BinaryOp::Modulo, int_expr(7), int_expr(3)).unwrap(),
        CypherValue::Integer(1)
    );
    let err = eval_binary(BinaryOp::Modulo, int_expr(7), int_expr(0)).unwrap_err();
    assert_eq!(err.root(), &EvalError::DivisionByZero);
}

#[test]
fn test_modulo_float_is_type_error() {
    let err = eval_binary(BinaryOp::Modulo, float_expr(7.5), int_expr(2)).unwrap_err();
    assert!(matches!(err.root(), EvalError::TypeMismatch { .. }));
}

#[test]
fn test_power_is_float() {
    assert_eq!(
        eval_binary(BinaryOp::Power, int_expr(2), int_expr(10)).unwrap(),
        CypherValue::Float(1024.0)
    );
}

// ============================================================================
// Negate Tests
// ============================================================================

#[test]
fn test_negate() {
    let expr = Expression::unary(UnaryOp::Negate, int_expr(5));
    assert_eq!(engine().evaluate(&expr, &ctx()).unwrap(), CypherValue::Integer(-5));

    let expr = Expression::unary(UnaryOp::Negate, Expression::null());
    assert_eq!(engine().evaluate(&expr, &ctx()).unwrap(), CypherValue::Null);
}

#[test]
fn test_negate_min_integer_overflows() {
    let expr = Expression::unary(UnaryOp::Negate, int_expr(i64::MIN));
    let err = engine().evaluate(&expr, &ctx()).unwrap_err();
    assert!(matches!(err.root(), EvalError::Overflow { .. }));
}
