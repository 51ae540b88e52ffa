//! Procedure registry for the Cypher evaluation engine
//!
//! Maps function names to their definitions. Names are resolved
//! case-insensitively, so `toUpper`, `TOUPPER` and `toupper` are one function.

use crate::error::EvalResult;
use crate::stdlib;
use cypher_types::{CypherType, CypherValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type alias for function implementations
///
/// Aggregating functions receive the collected column as their first argument.
pub type ProcedureFn = Arc<dyn Fn(&[CypherValue]) -> EvalResult<CypherValue> + Send + Sync>;

/// A registered function
#[derive(Clone)]
pub struct FunctionDefinition {
    /// Function name as registered
    pub name: String,
    /// Minimum number of arguments
    pub min_args: usize,
    /// Maximum number of arguments, `None` for variadic
    pub max_args: Option<usize>,
    /// Return type, used by type inference
    pub return_type: CypherType,
    /// Whether the function folds many rows into one value
    pub aggregating: bool,
    /// Implementation
    pub implementation: ProcedureFn,
}

impl FunctionDefinition {
    /// Create a single-argument scalar function
    pub fn new(name: impl Into<String>, return_type: CypherType, implementation: ProcedureFn) -> Self {
        Self {
            name: name.into(),
            min_args: 1,
            max_args: Some(1),
            return_type,
            aggregating: false,
            implementation,
        }
    }

    /// Set the accepted argument count range
    pub fn with_arity(mut self, min_args: usize, max_args: Option<usize>) -> Self {
        self.min_args = min_args;
        self.max_args = max_args;
        self
    }

    /// Mark as an aggregating function
    pub fn aggregating(mut self) -> Self {
        self.aggregating = true;
        self
    }

    /// Whether `count` arguments are accepted
    pub fn accepts_arity(&self, count: usize) -> bool {
        count >= self.min_args && self.max_args.is_none_or(|max| count <= max)
    }

    /// Human readable arity, used in error messages
    pub fn arity_description(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => format!("exactly {max} argument(s)"),
            Some(max) => format!("{} to {max} arguments", self.min_args),
            None => format!("at least {} argument(s)", self.min_args),
        }
    }

    /// Invoke the implementation
    pub fn invoke(&self, args: &[CypherValue]) -> EvalResult<CypherValue> {
        (self.implementation)(args)
    }
}

impl fmt::Debug for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDefinition")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .field("return_type", &self.return_type)
            .field("aggregating", &self.aggregating)
            .finish_non_exhaustive()
    }
}

/// Registry of callable functions
#[derive(Debug, Clone, Default)]
pub struct ProcedureRegistry {
    functions: HashMap<String, FunctionDefinition>,
}

impl ProcedureRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the standard scalar and aggregate functions
    pub fn with_standard_library() -> Self {
        let mut registry = Self::new();
        stdlib::register_standard_library(&mut registry);
        registry
    }

    /// Register a function, replacing any previous definition of the same name
    pub fn register(&mut self, definition: FunctionDefinition) {
        self.functions
            .insert(definition.name.to_lowercase(), definition);
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether `name` is a registered aggregating function
    pub fn is_aggregating(&self, name: &str) -> bool {
        self.get(name).is_some_and(|f| f.aggregating)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
