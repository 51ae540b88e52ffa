//! Evaluation errors for the Cypher engine

use cypher_types::ValueError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur during expression evaluation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// A value had the wrong variant for the operation
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Variable not bound in the current context
    #[error("Unbound variable: {name}")]
    UnboundVariable { name: String },

    /// Parameter not supplied with the query
    #[error("Unbound parameter: ${name}")]
    UnboundParameter { name: String },

    /// Expression kind the evaluator deliberately does not support
    #[error("Unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String },

    /// A function or procedure was invoked incorrectly
    #[error("Invalid invocation of {name}: {message}")]
    ProcedureInvocation { name: String, message: String },

    /// No function registered under this name
    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String },

    /// Integer division or modulo by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Arithmetic overflow
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: String },

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {pattern}")]
    InvalidRegex { pattern: String },

    /// A path could not be assembled from its steps
    #[error("Cannot construct path: {message}")]
    PathConstruction { message: String },

    /// A pattern expression was evaluated without a graph
    #[error("No graph configured for pattern evaluation")]
    MissingGraph,

    /// The graph collaborator failed
    #[error("Graph error: {message}")]
    Graph { message: String },

    /// Maximum recursion depth exceeded
    #[error("Maximum recursion depth exceeded")]
    RecursionLimit,

    /// An error annotated with the expression that raised it
    #[error("{source} (in `{expression}`)")]
    At {
        expression: String,
        #[source]
        source: Box<EvalError>,
    },
}

impl EvalError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unbound variable error
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        Self::UnboundVariable { name: name.into() }
    }

    /// Create an unbound parameter error
    pub fn unbound_parameter(name: impl Into<String>) -> Self {
        Self::UnboundParameter { name: name.into() }
    }

    /// Create an unsupported construct error
    pub fn unsupported(construct: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            construct: construct.into(),
        }
    }

    /// Create a procedure invocation error
    pub fn invocation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProcedureInvocation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an undefined function error
    pub fn undefined_function(name: impl Into<String>) -> Self {
        Self::UndefinedFunction { name: name.into() }
    }

    /// Create an overflow error
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
        }
    }

    /// Create an invalid regex error
    pub fn invalid_regex(pattern: impl Into<String>) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
        }
    }

    /// Create a path construction error
    pub fn path_construction(message: impl Into<String>) -> Self {
        Self::PathConstruction {
            message: message.into(),
        }
    }

    /// Create a graph error
    pub fn graph(message: impl Into<String>) -> Self {
        Self::Graph {
            message: message.into(),
        }
    }

    /// Annotate with the expression that raised the error.
    ///
    /// Only the innermost expression is recorded; an already annotated error
    /// is returned unchanged.
    pub fn at(self, expression: impl ToString) -> Self {
        match self {
            Self::At { .. } => self,
            other => Self::At {
                expression: expression.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, without the expression annotation
    pub fn root(&self) -> &EvalError {
        match self {
            Self::At { source, .. } => source.root(),
            other => other,
        }
    }

    /// The expression recorded by [`EvalError::at`], if any
    pub fn expression(&self) -> Option<&str> {
        match self {
            Self::At { expression, .. } => Some(expression),
            _ => None,
        }
    }
}

impl From<ValueError> for EvalError {
    fn from(err: ValueError) -> Self {
        match err {
            ValueError::TypeMismatch { expected, found } => Self::TypeMismatch { expected, found },
            ValueError::InvalidPath { message } => Self::PathConstruction { message },
        }
    }
}
