//! Aggregation over many rows
//!
//! Per-row evaluation cannot fold rows together. The caller collects the
//! contexts of every row in a group and calls [`CypherEngine::aggregate`]
//! once per aggregating expression.

use crate::context::BindingContext;
use crate::engine::CypherEngine;
use crate::error::{EvalError, EvalResult};
use cypher_ast::{Expression, FunctionInvocation};
use cypher_types::CypherValue;
use log::debug;

impl CypherEngine {
    /// Fold an aggregating expression over the rows of one group
    ///
    /// `count(*)` counts the rows. An aggregating function receives the
    /// column of its first argument (null values included, de-duplicated for
    /// `DISTINCT`), followed by its remaining arguments evaluated once
    /// against the first row.
    pub fn aggregate(
        &self,
        expr: &Expression,
        contexts: &[BindingContext],
    ) -> EvalResult<CypherValue> {
        let result = match expr {
            Expression::CountStar => i64::try_from(contexts.len())
                .map(CypherValue::Integer)
                .map_err(|_| EvalError::overflow("count(*)")),
            Expression::FunctionCall(call) => self.aggregate_function(call, contexts),
            other => Err(EvalError::invocation(
                other.kind(),
                "expression is not an aggregation",
            )),
        };
        result.map_err(|e| e.at(expr))
    }

    fn aggregate_function(
        &self,
        call: &FunctionInvocation,
        contexts: &[BindingContext],
    ) -> EvalResult<CypherValue> {
        let definition = self
            .registry()
            .get(&call.name)
            .ok_or_else(|| EvalError::undefined_function(&call.name))?;

        if !definition.aggregating {
            return Err(EvalError::invocation(&call.name, "not an aggregating function"));
        }
        let Some((column_expr, rest)) = call.args.split_first() else {
            return Err(EvalError::invocation(&call.name, "aggregation needs an argument"));
        };
        if !definition.accepts_arity(call.args.len()) {
            return Err(EvalError::invocation(
                &call.name,
                format!(
                    "expected {}, got {}",
                    definition.arity_description(),
                    call.args.len()
                ),
            ));
        }

        let mut column = Vec::with_capacity(contexts.len());
        for ctx in contexts {
            let value = self.evaluate(column_expr, ctx)?;
            if call.distinct && column.contains(&value) {
                continue;
            }
            column.push(value);
        }

        let first = contexts.first().cloned().unwrap_or_default();
        let mut args = Vec::with_capacity(call.args.len());
        args.push(CypherValue::List(column));
        for arg in rest {
            args.push(self.evaluate(arg, &first)?);
        }

        debug!(
            "aggregating {} over {} row(s){}",
            definition.name,
            contexts.len(),
            if call.distinct { " (distinct)" } else { "" }
        );
        definition.invoke(&args)
    }
}
