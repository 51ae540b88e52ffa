//! Binding context for expression evaluation
//!
//! A context is an immutable chain of frames. Deriving a context pushes a new
//! frame that shadows its parent; the parent is shared, never copied or
//! mutated, so contexts can be handed across threads and rows freely.

use crate::error::{EvalError, EvalResult};
use cypher_types::{CypherPath, CypherValue};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Frame {
    bindings: HashMap<String, CypherValue>,
    /// Variable-length segments matched earlier, keyed by relationship variable
    segments: HashMap<String, CypherPath>,
    parent: Option<Arc<Frame>>,
}

impl Frame {
    fn lookup(&self, name: &str) -> Option<&CypherValue> {
        match self.bindings.get(name) {
            Some(value) => Some(value),
            None => self.parent.as_deref().and_then(|p| p.lookup(name)),
        }
    }

    fn segment(&self, name: &str) -> Option<&CypherPath> {
        match self.segments.get(name) {
            Some(path) => Some(path),
            None => self.parent.as_deref().and_then(|p| p.segment(name)),
        }
    }
}

/// Variables, parameters and path segments visible to an expression
#[derive(Debug, Clone, Default)]
pub struct BindingContext {
    frame: Arc<Frame>,
    parameters: Arc<HashMap<String, CypherValue>>,
}

impl BindingContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a context
    pub fn builder() -> BindingContextBuilder {
        BindingContextBuilder::default()
    }

    /// Value bound to `name`
    pub fn get(&self, name: &str) -> EvalResult<&CypherValue> {
        self.lookup(name)
            .ok_or_else(|| EvalError::unbound_variable(name))
    }

    /// Value bound to `name`, if any
    pub fn lookup(&self, name: &str) -> Option<&CypherValue> {
        self.frame.lookup(name)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Parameter supplied with the query
    pub fn parameter(&self, name: &str) -> EvalResult<&CypherValue> {
        self.parameters
            .get(name)
            .ok_or_else(|| EvalError::unbound_parameter(name))
    }

    /// Segment matched for a variable-length relationship variable
    pub fn segment(&self, rel_variable: &str) -> Option<&CypherPath> {
        self.frame.segment(rel_variable)
    }

    /// Derive a context with one more binding
    pub fn with_binding(&self, name: impl Into<String>, value: CypherValue) -> Self {
        self.with_bindings([(name.into(), value)])
    }

    /// Derive a context with additional bindings shadowing this one
    pub fn with_bindings<K: Into<String>>(
        &self,
        bindings: impl IntoIterator<Item = (K, CypherValue)>,
    ) -> Self {
        self.derive(
            bindings.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            HashMap::new(),
        )
    }

    /// Derive a context that knows the segment matched for `rel_variable`
    pub fn with_segment(&self, rel_variable: impl Into<String>, path: CypherPath) -> Self {
        self.derive(HashMap::new(), HashMap::from([(rel_variable.into(), path)]))
    }

    fn derive(
        &self,
        bindings: HashMap<String, CypherValue>,
        segments: HashMap<String, CypherPath>,
    ) -> Self {
        Self {
            frame: Arc::new(Frame {
                bindings,
                segments,
                parent: Some(Arc::clone(&self.frame)),
            }),
            parameters: Arc::clone(&self.parameters),
        }
    }
}

/// Builder for the root [`BindingContext`] of a row
#[derive(Debug, Default)]
pub struct BindingContextBuilder {
    bindings: HashMap<String, CypherValue>,
    segments: HashMap<String, CypherPath>,
    parameters: HashMap<String, CypherValue>,
}

impl BindingContextBuilder {
    pub fn binding(mut self, name: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.bindings.insert(name.into(), value.into());
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add every entry of a JSON object as a parameter
    pub fn json_parameters(mut self, params: serde_json::Map<String, serde_json::Value>) -> Self {
        self.parameters.extend(
            params
                .into_iter()
                .map(|(k, v)| (k, CypherValue::from_json(v))),
        );
        self
    }

    pub fn segment(mut self, rel_variable: impl Into<String>, path: CypherPath) -> Self {
        self.segments.insert(rel_variable.into(), path);
        self
    }

    pub fn build(self) -> BindingContext {
        BindingContext {
            frame: Arc::new(Frame {
                bindings: self.bindings,
                segments: self.segments,
                parent: None,
            }),
            parameters: Arc::new(self.parameters),
        }
    }
}
