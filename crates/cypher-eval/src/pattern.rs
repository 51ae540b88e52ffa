//! Pattern expressions
//!
//! A one-hop pattern such as `(a)-[:KNOWS]->(b)` used as an expression
//! evaluates to the list of matching paths. Node and relationship patterns
//! are translated into filters, the graph answers the lookup, and paths whose
//! endpoints disagree with variables already bound on the row are dropped.

use crate::context::BindingContext;
use crate::engine::CypherEngine;
use crate::error::{EvalError, EvalResult};
use crate::graph::{NodeFilter, RelationshipFilter};
use cypher_ast::{Expression, NodePattern, RelationshipPattern, RelationshipsPattern};
use cypher_types::{CypherValue, Properties};
use log::{debug, warn};

/// What a pattern variable pins down on the current row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    /// Unnamed, or not yet bound
    Free,
    /// Bound to the entity with this id
    Bound(i64),
    /// Bound to null; nothing can match
    Null,
}

impl Endpoint {
    fn admits(self, id: i64) -> bool {
        match self {
            Self::Free => true,
            Self::Bound(bound) => bound == id,
            Self::Null => false,
        }
    }
}

fn endpoint(
    ctx: &BindingContext,
    variable: Option<&str>,
    expected: &str,
    id_of: impl Fn(&CypherValue) -> Option<i64>,
) -> EvalResult<Endpoint> {
    let Some(value) = variable.and_then(|name| ctx.lookup(name)) else {
        return Ok(Endpoint::Free);
    };
    if value.is_null() {
        return Ok(Endpoint::Null);
    }
    id_of(value)
        .map(Endpoint::Bound)
        .ok_or_else(|| EvalError::type_mismatch(expected, value.type_name()))
}

impl CypherEngine {
    /// Evaluate a pattern expression to the list of matching paths
    pub(crate) fn eval_pattern(
        &self,
        pattern: &RelationshipsPattern,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let [(relationship, end)] = pattern.chain.as_slice() else {
            return Err(EvalError::unsupported(format!(
                "pattern expression with {} hops",
                pattern.hops()
            )));
        };
        if !relationship.is_single_hop() {
            return Err(EvalError::unsupported(
                "variable-length relationship in pattern expression",
            ));
        }
        let graph = self.graph().ok_or(EvalError::MissingGraph)?;

        let start_bound = endpoint(ctx, pattern.start.variable.as_deref(), "Node", |v| {
            v.as_node().map(|n| n.id)
        })?;
        let end_bound = endpoint(ctx, end.variable.as_deref(), "Node", |v| {
            v.as_node().map(|n| n.id)
        })?;
        let rel_bound = endpoint(ctx, relationship.variable.as_deref(), "Relationship", |v| {
            v.as_relationship().map(|r| r.id)
        })?;
        if [start_bound, end_bound, rel_bound].contains(&Endpoint::Null) {
            return Ok(CypherValue::Null);
        }

        let start_filter = self.translate_node(&pattern.start, ctx, depth)?;
        let rel_filter = self.translate_relationship(relationship, ctx, depth)?;
        let end_filter = self.translate_node(end, ctx, depth)?;

        debug!("pattern lookup {pattern}");
        let paths = graph
            .paths(
                &start_filter,
                &rel_filter,
                &end_filter,
                relationship.direction,
                1,
                1,
            )
            .map_err(|e| {
                warn!("graph lookup for {pattern} failed: {e}");
                EvalError::graph(e.to_string())
            })?;

        let matched = paths
            .into_iter()
            .filter(|path| {
                start_bound.admits(path.start().id)
                    && end_bound.admits(path.end().id)
                    && path
                        .relationships()
                        .first()
                        .is_some_and(|r| rel_bound.admits(r.id))
            })
            .map(CypherValue::Path)
            .collect::<Vec<_>>();
        debug!("pattern {pattern} matched {} path(s)", matched.len());
        Ok(CypherValue::List(matched))
    }

    // =========================================================================
    // Pattern-to-filter translation
    // =========================================================================

    /// Translate a node pattern into a filter, evaluating its property
    /// expressions against `ctx`
    pub fn node_filter(&self, pattern: &NodePattern, ctx: &BindingContext) -> EvalResult<NodeFilter> {
        self.translate_node(pattern, ctx, 0)
    }

    /// Translate a relationship pattern into a filter, evaluating its property
    /// expressions against `ctx`
    pub fn relationship_filter(
        &self,
        pattern: &RelationshipPattern,
        ctx: &BindingContext,
    ) -> EvalResult<RelationshipFilter> {
        self.translate_relationship(pattern, ctx, 0)
    }

    fn translate_node(
        &self,
        pattern: &NodePattern,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<NodeFilter> {
        Ok(NodeFilter::new(
            pattern.labels.clone(),
            self.eval_properties(&pattern.properties, ctx, depth)?,
        ))
    }

    fn translate_relationship(
        &self,
        pattern: &RelationshipPattern,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<RelationshipFilter> {
        Ok(RelationshipFilter::new(
            pattern.types.clone(),
            self.eval_properties(&pattern.properties, ctx, depth)?,
        ))
    }

    fn eval_properties(
        &self,
        properties: &[(String, Expression)],
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<Properties> {
        let mut map = Properties::with_capacity(properties.len());
        for (key, expr) in properties {
            map.insert(key.clone(), self.eval(expr, ctx, depth)?);
        }
        Ok(map)
    }
}
