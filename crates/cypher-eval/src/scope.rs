//! Scoped evaluation: CASE, list comprehension, reduce, quantifiers and map
//! projection.
//!
//! Each construct derives a child [`BindingContext`] per element; the
//! caller's context is never modified.

use crate::context::BindingContext;
use crate::engine::CypherEngine;
use crate::error::{EvalError, EvalResult};
use crate::operators::cypher_equal;
use cypher_ast::{
    CaseExpression, Expression, ListComprehension, MapProjection, MapProjectionItem,
    QuantifiedExpression, Quantifier, ReduceExpression,
};
use cypher_types::{CypherValue, Properties};
use log::trace;

/// Source list of a scoped construct; `None` when the source is null
fn source_list(value: CypherValue) -> EvalResult<Option<Vec<CypherValue>>> {
    match value {
        CypherValue::Null => Ok(None),
        CypherValue::List(items) => Ok(Some(items)),
        other => Err(EvalError::type_mismatch("List", other.type_name())),
    }
}

impl CypherEngine {
    // =========================================================================
    // CASE
    // =========================================================================

    /// Evaluate CASE expression
    ///
    /// With a subject, an alternative matches when its guard is `true` or
    /// equals the subject; a null subject yields null. Without a subject the
    /// first `true` guard wins.
    pub(crate) fn eval_case(
        &self,
        expr: &CaseExpression,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let subject = match &expr.subject {
            Some(subject) => match self.eval(subject, ctx, depth)? {
                CypherValue::Null => return Ok(CypherValue::Null),
                value => Some(value),
            },
            None => None,
        };

        for alternative in &expr.alternatives {
            let guard = self.eval(&alternative.when, ctx, depth)?;
            let matched = guard.is_true()
                || subject
                    .as_ref()
                    .is_some_and(|s| cypher_equal(s, &guard) == Some(true));
            if matched {
                return self.eval(&alternative.then, ctx, depth);
            }
        }

        match &expr.default {
            Some(default) => self.eval(default, ctx, depth),
            None => Ok(CypherValue::Null),
        }
    }

    // =========================================================================
    // List comprehension
    // =========================================================================

    /// Evaluate `[x IN list WHERE predicate | projection]`
    pub(crate) fn eval_list_comprehension(
        &self,
        expr: &ListComprehension,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let Some(items) = source_list(self.eval(&expr.list, ctx, depth)?)? else {
            return Ok(CypherValue::Null);
        };
        trace!("list comprehension over {} item(s) as {}", items.len(), expr.variable);

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let scope = ctx.with_binding(&expr.variable, item.clone());
            let keep = match &expr.predicate {
                Some(predicate) => self.predicate_holds(predicate, &scope, depth)?,
                None => true,
            };
            if !keep {
                continue;
            }
            match &expr.projection {
                Some(projection) => result.push(self.eval(projection, &scope, depth)?),
                None => result.push(item),
            }
        }
        Ok(CypherValue::List(result))
    }

    /// Whether a filter predicate keeps the current element; null drops it
    fn predicate_holds(
        &self,
        predicate: &Expression,
        scope: &BindingContext,
        depth: usize,
    ) -> EvalResult<bool> {
        match self.eval(predicate, scope, depth)? {
            CypherValue::Boolean(b) => Ok(b),
            CypherValue::Null => Ok(false),
            other => Err(EvalError::type_mismatch("Boolean", other.type_name())),
        }
    }

    // =========================================================================
    // Reduce
    // =========================================================================

    /// Evaluate `reduce(acc = init, x IN list | expression)` as a left fold
    pub(crate) fn eval_reduce(
        &self,
        expr: &ReduceExpression,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let mut accumulator = self.eval(&expr.init, ctx, depth)?;
        let Some(items) = source_list(self.eval(&expr.list, ctx, depth)?)? else {
            return Ok(CypherValue::Null);
        };
        trace!("reduce over {} item(s) into {}", items.len(), expr.accumulator);

        for item in items {
            let scope = ctx.with_bindings([
                (expr.accumulator.as_str(), accumulator),
                (expr.variable.as_str(), item),
            ]);
            accumulator = self.eval(&expr.expression, &scope, depth)?;
        }
        Ok(accumulator)
    }

    // =========================================================================
    // Quantifiers
    // =========================================================================

    /// Evaluate `all/any/none/single(x IN list WHERE predicate)`
    ///
    /// A missing predicate holds for every element; a null predicate result
    /// counts as not holding.
    ///
    /// | quantifier | empty list |
    /// |------------|------------|
    /// | ALL        | true       |
    /// | ANY        | false      |
    /// | NONE       | true       |
    /// | SINGLE     | false      |
    pub(crate) fn eval_quantified(
        &self,
        expr: &QuantifiedExpression,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let Some(items) = source_list(self.eval(&expr.list, ctx, depth)?)? else {
            return Ok(CypherValue::Null);
        };
        trace!("{:?} over {} item(s)", expr.quantifier, items.len());

        let mut holds = items.into_iter().map(|item| match &expr.predicate {
            Some(predicate) => {
                let scope = ctx.with_binding(&expr.variable, item);
                self.predicate_holds(predicate, &scope, depth)
            }
            None => Ok(true),
        });

        let result = match expr.quantifier {
            Quantifier::All => try_all(&mut holds, |h| h)?,
            Quantifier::Any => !try_all(&mut holds, |h| !h)?,
            Quantifier::None => try_all(&mut holds, |h| !h)?,
            Quantifier::Single => {
                // Locate the first match, then confirm there is no second one
                !try_all(&mut holds, |h| !h)? && try_all(&mut holds, |h| !h)?
            }
        };
        Ok(CypherValue::Boolean(result))
    }

    // =========================================================================
    // Map projection
    // =========================================================================

    /// Evaluate `v {.key, alias: expr, other, .*}`
    pub(crate) fn eval_map_projection(
        &self,
        projection: &MapProjection,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let subject = ctx.get(&projection.variable)?;
        let properties = match subject {
            CypherValue::Null => return Ok(CypherValue::Null),
            CypherValue::Map(map) => map,
            CypherValue::Node(node) => &node.properties,
            CypherValue::Relationship(rel) => &rel.properties,
            other => {
                return Err(EvalError::type_mismatch(
                    "Map, Node or Relationship",
                    other.type_name(),
                ));
            }
        };

        let mut result = Properties::new();
        for item in &projection.items {
            match item {
                MapProjectionItem::Property(key) => {
                    let value = properties.get(key).cloned().unwrap_or(CypherValue::Null);
                    result.insert(key.clone(), value);
                }
                MapProjectionItem::Literal { key, value } => {
                    result.insert(key.clone(), self.eval(value, ctx, depth)?);
                }
                MapProjectionItem::Variable(name) => {
                    result.insert(name.clone(), ctx.get(name)?.clone());
                }
                MapProjectionItem::AllProperties => {
                    result.extend(properties.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
            }
        }
        Ok(CypherValue::Map(result))
    }
}

/// Consume `iter` until `pred` fails on an element, propagating errors.
/// Returns `true` if every consumed element satisfied `pred`.
fn try_all(
    iter: &mut impl Iterator<Item = EvalResult<bool>>,
    pred: impl Fn(bool) -> bool,
) -> EvalResult<bool> {
    for holds in iter {
        if !pred(holds?) {
            return Ok(false);
        }
    }
    Ok(true)
}
