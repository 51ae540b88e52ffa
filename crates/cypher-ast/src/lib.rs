//! Cypher expression AST definitions
//!
//! This crate defines the expression nodes consumed by the evaluation engine.
//! The tree is produced by an external parser/planner and is treated as
//! read-only input by every consumer.

mod display;
mod expression;
mod literal;
mod operator;
mod path;
mod pattern;

pub use expression::*;
pub use literal::*;
pub use operator::*;
pub use path::*;
pub use pattern::*;

/// Type alias for boxed expressions
pub type BoxExpr = Box<Expression>;

/// Type alias for optional boxed expressions
pub type OptBoxExpr = Option<Box<Expression>>;
