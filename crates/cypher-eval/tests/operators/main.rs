//! Operator integration tests for Cypher evaluation
//!
//! These tests verify operator behavior including:
//! - Correct computation for various input types
//! - Null propagation
//! - Three-valued logic for logical operators
//! - Edge cases and boundary conditions

mod arithmetic;
mod comparison;
mod list;
mod logical;
mod string;
