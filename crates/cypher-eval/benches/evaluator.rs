//! Evaluator benchmarks using divan
//!
//! Benchmarks for per-row expression evaluation and aggregation.

use cypher_ast::{BinaryOp, Expression, ListComprehension, ReduceExpression};
use cypher_eval::{BindingContext, CypherEngine};
use cypher_types::{CypherNode, CypherValue};

fn main() {
    divan::main();
}

fn int_expr(value: i64) -> Expression {
    Expression::literal(value)
}

fn numbers(len: i64) -> CypherValue {
    CypherValue::list((0..len).map(CypherValue::Integer))
}

// === Literal and Variable Benchmarks ===

mod atoms {
    use super::*;

    #[divan::bench]
    fn integer_literal(bencher: divan::Bencher) {
        let engine = CypherEngine::new();
        let ctx = BindingContext::new();
        let expr = int_expr(42);

        bencher.bench_local(|| engine.evaluate(divan::black_box(&expr), &ctx));
    }

    #[divan::bench]
    fn property_access(bencher: divan::Bencher) {
        let engine = CypherEngine::new();
        let ctx = BindingContext::builder()
            .binding("n", CypherNode::new(1).with_property("name", "Alice"))
            .build();
        let expr = Expression::var("n").property("name");

        bencher.bench_local(|| engine.evaluate(divan::black_box(&expr), &ctx));
    }
}

// === Operator Benchmarks ===

mod operators {
    use super::*;

    #[divan::bench]
    fn nested_arithmetic(bencher: divan::Bencher) {
        let engine = CypherEngine::new();
        let ctx = BindingContext::builder().binding("x", 7i64).build();
        // ((x + 1) * 3) - (x % 4)
        let expr = Expression::binary(
            BinaryOp::Subtract,
            Expression::binary(
                BinaryOp::Multiply,
                Expression::binary(BinaryOp::Add, Expression::var("x"), int_expr(1)),
                int_expr(3),
            ),
            Expression::binary(BinaryOp::Modulo, Expression::var("x"), int_expr(4)),
        );

        bencher.bench_local(|| engine.evaluate(divan::black_box(&expr), &ctx));
    }

    #[divan::bench]
    fn cached_regex(bencher: divan::Bencher) {
        let engine = CypherEngine::new();
        let ctx = BindingContext::new();
        let expr = Expression::binary(
            BinaryOp::RegexMatch,
            Expression::literal("alice@example.com"),
            Expression::literal(r"[a-z]+@[a-z]+\.com"),
        );

        bencher.bench_local(|| engine.evaluate(divan::black_box(&expr), &ctx));
    }

    #[divan::bench(args = [10, 100, 1000])]
    fn in_list(bencher: divan::Bencher, len: i64) {
        let engine = CypherEngine::new();
        let ctx = BindingContext::builder().binding("l", numbers(len)).build();
        let expr = Expression::binary(BinaryOp::In, int_expr(len - 1), Expression::var("l"));

        bencher.bench_local(|| engine.evaluate(divan::black_box(&expr), &ctx));
    }
}

// === Scoped Expression Benchmarks ===

mod scoped {
    use super::*;

    #[divan::bench(args = [10, 100, 1000])]
    fn list_comprehension(bencher: divan::Bencher, len: i64) {
        let engine = CypherEngine::new();
        let ctx = BindingContext::builder().binding("l", numbers(len)).build();
        let expr = Expression::ListComprehension(ListComprehension {
            variable: "x".to_string(),
            list: Box::new(Expression::var("l")),
            predicate: Some(Box::new(Expression::binary(
                BinaryOp::GreaterThan,
                Expression::var("x"),
                int_expr(len / 2),
            ))),
            projection: Some(Box::new(Expression::binary(
                BinaryOp::Multiply,
                Expression::var("x"),
                int_expr(2),
            ))),
        });

        bencher.bench_local(|| engine.evaluate(divan::black_box(&expr), &ctx));
    }

    #[divan::bench(args = [10, 100, 1000])]
    fn reduce_sum(bencher: divan::Bencher, len: i64) {
        let engine = CypherEngine::new();
        let ctx = BindingContext::builder().binding("l", numbers(len)).build();
        let expr = Expression::Reduce(ReduceExpression {
            accumulator: "acc".to_string(),
            init: Box::new(int_expr(0)),
            variable: "x".to_string(),
            list: Box::new(Expression::var("l")),
            expression: Box::new(Expression::binary(
                BinaryOp::Add,
                Expression::var("acc"),
                Expression::var("x"),
            )),
        });

        bencher.bench_local(|| engine.evaluate(divan::black_box(&expr), &ctx));
    }
}

// === Aggregation Benchmarks ===

mod aggregation {
    use super::*;

    #[divan::bench(args = [10, 100, 1000])]
    fn sum_over_rows(bencher: divan::Bencher, rows: i64) {
        let engine = CypherEngine::new();
        let contexts: Vec<BindingContext> = (0..rows)
            .map(|i| BindingContext::builder().binding("x", i).build())
            .collect();
        let expr = Expression::call("sum", vec![Expression::var("x")]);

        bencher.bench_local(|| engine.aggregate(divan::black_box(&expr), &contexts));
    }

    #[divan::bench(args = [10, 100, 1000])]
    fn distinct_collect(bencher: divan::Bencher, rows: i64) {
        let engine = CypherEngine::new();
        let contexts: Vec<BindingContext> = (0..rows)
            .map(|i| BindingContext::builder().binding("x", i % 10).build())
            .collect();
        let expr = Expression::call_distinct("collect", vec![Expression::var("x")]);

        bencher.bench_local(|| engine.aggregate(divan::black_box(&expr), &contexts));
    }
}
