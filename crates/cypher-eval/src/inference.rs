//! Static type inference for expressions
//!
//! Best effort: [`CypherEngine::infer_type`] returns `None` whenever the type
//! depends on runtime data, such as property values or unknown variables.

use crate::engine::CypherEngine;
use cypher_ast::{BinaryOp, Expression, Literal, UnaryOp};
use cypher_types::{CypherType, TypeEnvironment};

impl CypherEngine {
    /// Infer the static type of `expr` under the declarations in `env`
    pub fn infer_type(&self, expr: &Expression, env: &TypeEnvironment) -> Option<CypherType> {
        match expr {
            // === Atoms ===
            Expression::Literal(lit) => literal_type(lit),
            Expression::Variable(name) => env.variable(name).cloned(),
            Expression::Parameter(name) => env.parameter(name).cloned(),

            // === Access ===
            Expression::Property(_) => None,
            Expression::Index(e) => self
                .infer_type(&e.container, env)?
                .element_type()
                .cloned(),
            Expression::Slice(e) => match self.infer_type(&e.list, env)? {
                list @ CypherType::List(_) => Some(list),
                _ => None,
            },

            // === Operators ===
            Expression::Binary(e) if e.op.is_predicate() => Some(CypherType::Boolean),
            Expression::Binary(e) => {
                let left = self.infer_type(&e.left, env);
                let right = self.infer_type(&e.right, env);
                arithmetic_type(e.op, left.as_ref(), right.as_ref())
            }
            Expression::Unary(e) => match e.op {
                UnaryOp::Not | UnaryOp::IsNull | UnaryOp::IsNotNull => Some(CypherType::Boolean),
                UnaryOp::Negate => self
                    .infer_type(&e.operand, env)
                    .filter(|t| t.is_numeric() || *t == CypherType::Duration),
            },
            Expression::Ands(_) | Expression::Ors(_) => Some(CypherType::Boolean),

            // === Invocation ===
            Expression::FunctionCall(call) => self
                .registry()
                .get(&call.name)
                .map(|f| f.return_type.clone()),
            Expression::CountStar => Some(CypherType::Integer),

            // === Constructors ===
            Expression::List(items) => {
                let types = items
                    .iter()
                    .map(|item| self.infer_type(item, env).unwrap_or(CypherType::Any))
                    .collect::<Vec<_>>();
                Some(CypherType::list(CypherType::unify(&types)))
            }
            Expression::Map(_) | Expression::MapProjection(_) => Some(CypherType::Map),

            // === Conditionals ===
            Expression::Case(e) => {
                let mut types = Vec::with_capacity(e.alternatives.len() + 1);
                for alternative in &e.alternatives {
                    types.push(self.infer_type(&alternative.then, env)?);
                }
                if let Some(default) = &e.default {
                    types.push(self.infer_type(default, env)?);
                }
                Some(CypherType::unify(&types))
            }

            // === Scoped list operations ===
            Expression::ListComprehension(e) => {
                let list_type = self.infer_type(&e.list, env);
                let element = list_type
                    .as_ref()
                    .and_then(CypherType::element_type)
                    .cloned()
                    .unwrap_or(CypherType::Any);
                match &e.projection {
                    Some(projection) => {
                        let scope = env.extended(&e.variable, element);
                        let projected = self
                            .infer_type(projection, &scope)
                            .unwrap_or(CypherType::Any);
                        Some(CypherType::list(projected))
                    }
                    None => Some(CypherType::list(element)),
                }
            }
            Expression::Reduce(e) => self.infer_type(&e.init, env),
            Expression::Quantified(_) => Some(CypherType::Boolean),

            // === Graph ===
            Expression::Pattern(_) => Some(CypherType::list(CypherType::Path)),
            Expression::PatternComprehension(_) => None,
            Expression::Path(_) => Some(CypherType::Path),
        }
    }
}

fn literal_type(lit: &Literal) -> Option<CypherType> {
    match lit {
        Literal::Null => None,
        Literal::Boolean(_) => Some(CypherType::Boolean),
        Literal::Integer(_) => Some(CypherType::Integer),
        Literal::Float(_) => Some(CypherType::Float),
        Literal::String(_) => Some(CypherType::String),
    }
}

/// Numeric promotion: Integer with Integer stays Integer, otherwise Float,
/// or the general Number when either side is only known to be numeric
fn numeric_type(left: &CypherType, right: &CypherType) -> Option<CypherType> {
    match (left, right) {
        (CypherType::Integer, CypherType::Integer) => Some(CypherType::Integer),
        (CypherType::Number, r) if r.is_numeric() => Some(CypherType::Number),
        (l, CypherType::Number) if l.is_numeric() => Some(CypherType::Number),
        (l, r) if l.is_numeric() && r.is_numeric() => Some(CypherType::Float),
        _ => None,
    }
}

fn is_temporal_point(ty: &CypherType) -> bool {
    ty.is_temporal() && *ty != CypherType::Duration
}

fn arithmetic_type(
    op: BinaryOp,
    left: Option<&CypherType>,
    right: Option<&CypherType>,
) -> Option<CypherType> {
    if op == BinaryOp::Power {
        return Some(CypherType::Float);
    }
    let (left, right) = (left?, right?);
    if left.is_any() || right.is_any() {
        return None;
    }

    match op {
        BinaryOp::Add => match (left, right) {
            (CypherType::List(a), CypherType::List(b)) => Some(CypherType::list(a.common_supertype(b))),
            (CypherType::List(a), item) | (item, CypherType::List(a)) => {
                Some(CypherType::list(a.common_supertype(item)))
            }
            (CypherType::String, _) | (_, CypherType::String) => Some(CypherType::String),
            (CypherType::Duration, CypherType::Duration) => Some(CypherType::Duration),
            (point, CypherType::Duration) | (CypherType::Duration, point)
                if is_temporal_point(point) =>
            {
                Some(point.clone())
            }
            _ => numeric_type(left, right),
        },
        BinaryOp::Subtract => match (left, right) {
            (CypherType::Duration, CypherType::Duration) => Some(CypherType::Duration),
            (point, CypherType::Duration) if is_temporal_point(point) => Some(point.clone()),
            _ => numeric_type(left, right),
        },
        BinaryOp::Multiply => match (left, right) {
            (CypherType::Duration, CypherType::Integer)
            | (CypherType::Integer, CypherType::Duration) => Some(CypherType::Duration),
            _ => numeric_type(left, right),
        },
        BinaryOp::Divide => match (left, right) {
            (CypherType::Duration, CypherType::Integer) => Some(CypherType::Duration),
            _ => numeric_type(left, right),
        },
        BinaryOp::Modulo => {
            (*left == CypherType::Integer && *right == CypherType::Integer)
                .then_some(CypherType::Integer)
        }
        _ => None,
    }
}
