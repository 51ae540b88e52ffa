//! Operator implementations for the Cypher engine
//!
//! Every operator is a plain function over already evaluated operands. The
//! engine evaluates the operands and dispatches here.

pub mod arithmetic;
pub mod comparison;
pub mod list;
pub mod logical;
pub mod string;

pub use comparison::{cypher_compare, cypher_equal};
