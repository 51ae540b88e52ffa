//! Declared types of variables and parameters, used by type inference

use crate::CypherType;
use std::collections::HashMap;

/// Declared types for the names visible to an expression
#[derive(Debug, Clone, Default)]
pub struct TypeEnvironment {
    variables: HashMap<String, CypherType>,
    parameters: HashMap<String, CypherType>,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable type, builder style
    pub fn with_variable(mut self, name: impl Into<String>, ty: CypherType) -> Self {
        self.declare_variable(name, ty);
        self
    }

    /// Declare a parameter type, builder style
    pub fn with_parameter(mut self, name: impl Into<String>, ty: CypherType) -> Self {
        self.parameters.insert(name.into(), ty);
        self
    }

    pub fn declare_variable(&mut self, name: impl Into<String>, ty: CypherType) {
        self.variables.insert(name.into(), ty);
    }

    pub fn variable(&self, name: &str) -> Option<&CypherType> {
        self.variables.get(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&CypherType> {
        self.parameters.get(name)
    }

    /// A copy of this environment with one more variable declared
    pub fn extended(&self, name: impl Into<String>, ty: CypherType) -> Self {
        self.clone().with_variable(name, ty)
    }
}
