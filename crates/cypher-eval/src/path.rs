//! Path assembly from step chains
//!
//! A [`PathStep`] chain is walked front to back. Node and relationship steps
//! evaluate expressions against the row; multi-hop steps splice in a segment
//! matched earlier and registered on the context with
//! [`BindingContext::with_segment`]. A segment already holds its boundary
//! nodes, so the node before a multi-hop step is never evaluated or added.

use crate::context::BindingContext;
use crate::engine::CypherEngine;
use crate::error::{EvalError, EvalResult};
use cypher_ast::{Expression, PathStep};
use cypher_types::{CypherNode, CypherPath, CypherRelationship, CypherValue, PathElement};

impl CypherEngine {
    /// Evaluate a path expression
    ///
    /// Any null node or relationship along the chain makes the whole path null,
    /// as happens for rows produced by an optional match.
    pub(crate) fn eval_path(
        &self,
        step: &PathStep,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<CypherValue> {
        let Some(elements) = self.assemble(step, ctx, depth)? else {
            return Ok(CypherValue::Null);
        };
        if elements.is_empty() {
            return Err(EvalError::path_construction("path has no steps"));
        }
        Ok(CypherValue::Path(CypherPath::from_elements(elements)?))
    }

    /// Element sequence for `step` and everything after it, `None` when a
    /// null was encountered
    fn assemble(
        &self,
        step: &PathStep,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<Option<Vec<PathElement>>> {
        let (mut elements, next) = match step {
            PathStep::End => return Ok(Some(Vec::new())),

            PathStep::Node { next, .. } if is_multi_hop(next) => {
                return self.assemble(next, ctx, depth);
            }
            PathStep::Node { node, next } => {
                let Some(node) = self.eval_node(node, ctx, depth)? else {
                    return Ok(None);
                };
                (vec![PathElement::Node(node)], next)
            }

            PathStep::Relationship {
                relationship,
                node,
                next,
            } => {
                let Some(node) = node else {
                    return Err(EvalError::path_construction(format!(
                        "relationship `{relationship}` has no destination node"
                    )));
                };
                let Some(rel) = self.eval_relationship(relationship, ctx, depth)? else {
                    return Ok(None);
                };
                let mut elements = vec![PathElement::Relationship(rel)];
                if !is_multi_hop(next) {
                    let Some(node) = self.eval_node(node, ctx, depth)? else {
                        return Ok(None);
                    };
                    elements.push(PathElement::Node(node));
                }
                (elements, next)
            }

            PathStep::MultiHop { relationship, next } => {
                let segment = ctx
                    .segment(relationship)
                    .ok_or_else(|| EvalError::unbound_variable(relationship))?;
                (segment.elements(), next)
            }
        };

        let Some(rest) = self.assemble(next, ctx, depth)? else {
            return Ok(None);
        };
        elements.extend(rest);
        Ok(Some(elements))
    }

    fn eval_node(
        &self,
        expr: &Expression,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<Option<CypherNode>> {
        match self.eval(expr, ctx, depth)? {
            CypherValue::Null => Ok(None),
            CypherValue::Node(node) => Ok(Some(node)),
            other => Err(EvalError::type_mismatch("Node", other.type_name())),
        }
    }

    fn eval_relationship(
        &self,
        expr: &Expression,
        ctx: &BindingContext,
        depth: usize,
    ) -> EvalResult<Option<CypherRelationship>> {
        match self.eval(expr, ctx, depth)? {
            CypherValue::Null => Ok(None),
            CypherValue::Relationship(rel) => Ok(Some(rel)),
            other => Err(EvalError::type_mismatch("Relationship", other.type_name())),
        }
    }
}

fn is_multi_hop(step: &PathStep) -> bool {
    matches!(step, PathStep::MultiHop { .. })
}
