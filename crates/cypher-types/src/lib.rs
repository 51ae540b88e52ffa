//! Cypher value model and type system
//!
//! This crate defines:
//! - Runtime values (primitives, collections, graph entities, temporals)
//! - Durations and calendar arithmetic
//! - Static types and the type environment used for inference
//! - JSON wrapping of host values

pub mod environment;
pub mod error;
pub mod json;
pub mod temporal;
pub mod type_system;
pub mod value;

pub use environment::TypeEnvironment;
pub use error::ValueError;
pub use temporal::CypherDuration;
pub use type_system::CypherType;
pub use value::*;
