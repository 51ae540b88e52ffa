//! String Operator Tests
//!
//! Tests for: STARTS WITH, ENDS WITH, CONTAINS, =~

use cypher_ast::{BinaryOp, Expression};
use cypher_eval::{BindingContext, CypherEngine, EvalError, EvaluatorOptions};
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

fn str_expr(s: &str) -> Expression {
    Expression::literal(s)
}

fn eval_binary(op: BinaryOp, left: Expression, right: Expression) -> Result<CypherValue, EvalError> {
    engine().evaluate(&Expression::binary(op, left, right), &ctx())
}

// ============================================================================
// Substring predicates
// ============================================================================

#[rstest]
#[case(BinaryOp::StartsWith, "hello", "he", true)]
#[case(BinaryOp::StartsWith, "hello", "lo", false)]
#[case(BinaryOp::EndsWith, "hello", "lo", true)]
#[case(BinaryOp::EndsWith, "hello", "he", false)]
#[case(BinaryOp::Contains, "hello", "ell", true)]
#[case(BinaryOp::Contains, "hello", "", true)]
#[case(BinaryOp::Contains, "hello", "xyz", false)]
fn test_string_predicates(
    #[case] op: BinaryOp,
    #[case] text: &str,
    #[case] needle: &str,
    #[case] expected: bool,
) {
    let result = eval_binary(op, str_expr(text), str_expr(needle)).unwrap();
    assert_eq!(result, CypherValue::Boolean(expected));
}

/// Null Handling:
/// | left   | right  | result |
/// |--------|--------|--------|
/// | null   | *      | false  |
/// | string | null   | null   |
#[rstest]
#[case(BinaryOp::StartsWith)]
#[case(BinaryOp::EndsWith)]
#[case(BinaryOp::Contains)]
#[case(BinaryOp::RegexMatch)]
fn test_null_left_is_false(#[case] op: BinaryOp) {
    let result = eval_binary(op, Expression::null(), str_expr("a")).unwrap();
    assert_eq!(result, CypherValue::Boolean(false));
}

#[rstest]
#[case(BinaryOp::StartsWith)]
#[case(BinaryOp::EndsWith)]
#[case(BinaryOp::Contains)]
#[case(BinaryOp::RegexMatch)]
fn test_null_right_is_null(#[case] op: BinaryOp) {
    let result = eval_binary(op, str_expr("a"), Expression::null()).unwrap();
    assert_eq!(result, CypherValue::Null);
}

#[test]
fn test_non_string_operand_is_type_error() {
    let err = eval_binary(BinaryOp::StartsWith, Expression::literal(1i64), str_expr("1")).unwrap_err();
    assert!(matches!(err.root(), EvalError::TypeMismatch { .. }));

    let err = eval_binary(BinaryOp::Contains, str_expr("1"), Expression::literal(1i64)).unwrap_err();
    assert!(matches!(err.root(), EvalError::TypeMismatch { .. }));
}

// ============================================================================
// Regex
// ============================================================================

#[test]
fn test_regex_must_match_whole_string() {
    assert_eq!(
        eval_binary(BinaryOp::RegexMatch, str_expr("abc"), str_expr("a.c")).unwrap(),
        CypherValue::Boolean(true)
    );
    assert_eq!(
        eval_binary(BinaryOp::RegexMatch, str_expr("abcd"), str_expr("a.c")).unwrap(),
        CypherValue::Boolean(false)
    );
}

#[test]
fn test_regex_alternation_is_anchored() {
    assert_eq!(
        eval_binary(BinaryOp::RegexMatch, str_expr("xb"), str_expr("a|b")).unwrap(),
        CypherValue::Boolean(false)
    );
}

#[test]
fn test_invalid_regex() {
    let err = eval_binary(BinaryOp::RegexMatch, str_expr("a"), str_expr("(")).unwrap_err();
    assert_eq!(err.root(), &EvalError::invalid_regex("("));
}

#[test]
fn test_regex_without_cache() {
    let engine = CypherEngine::new().with_options(EvaluatorOptions::new().with_regex_cache_capacity(0));
    let expr = Expression::binary(BinaryOp::RegexMatch, str_expr("2024"), str_expr(r"\d+"));
    for _ in 0..3 {
        assert_eq!(engine.evaluate(&expr, &ctx()).unwrap(), CypherValue::Boolean(true));
    }
}
