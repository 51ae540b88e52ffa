//! Cypher Expression Evaluation Engine
//!
//! This crate evaluates Cypher expressions against a row of bound variables:
//!
//! - **Operators**: arithmetic with numeric promotion, comparison, string
//!   predicates, list membership, subscripts and slices
//! - **Three-valued logic**: AND, OR, XOR and NOT over true, false and null
//! - **Scoped expressions**: CASE, list comprehension, reduce, quantifiers
//!   and map projection
//! - **Paths**: rebuilding path values from step chains, including spliced
//!   variable-length segments
//! - **Patterns**: one-hop pattern expressions answered by a [`GraphModel`]
//! - **Aggregation**: folding many rows through aggregating functions
//! - **Type inference**: best-effort static types for expressions
//!
//! # Example
//!
//! ```
//! use cypher_ast::{BinaryOp, Expression};
//! use cypher_eval::{BindingContext, CypherEngine};
//! use cypher_types::CypherValue;
//!
//! let engine = CypherEngine::new();
//! let ctx = BindingContext::builder().binding("x", 41i64).build();
//! let expr = Expression::binary(BinaryOp::Add, Expression::var("x"), Expression::literal(1i64));
//!
//! assert_eq!(engine.evaluate(&expr, &ctx).unwrap(), CypherValue::Integer(42));
//! ```
//!
//! # Architecture
//!
//! - `CypherEngine`: dispatches each expression kind to its implementation
//! - `BindingContext`: immutable, shareable variable scope for one row
//! - `operators`: value-level operator semantics
//! - `ProcedureRegistry`: named scalar and aggregating functions
//!
//! # Three-Valued Logic
//!
//! - `AND`: false dominates (null AND false = false)
//! - `OR`: true dominates (null OR true = true)
//! - Comparisons involving null are null

pub mod aggregate;
pub mod context;
pub mod engine;
pub mod error;
pub mod graph;
pub mod inference;
pub mod operators;
pub mod options;
pub mod path;
pub mod pattern;
pub mod registry;
pub mod scope;
pub mod stdlib;

// Re-export main types
pub use context::{BindingContext, BindingContextBuilder};
pub use engine::CypherEngine;
pub use error::{EvalError, EvalResult};
pub use graph::{GraphError, GraphModel, MemoryGraph, NodeFilter, RelationshipFilter};
pub use options::EvaluatorOptions;
pub use registry::{FunctionDefinition, ProcedureFn, ProcedureRegistry};

// Re-export commonly used operator helpers
pub use operators::comparison::{cypher_compare, cypher_equal};
