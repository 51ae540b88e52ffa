//! Cypher type system
//!
//! This module defines the static types used by type inference:
//! - CypherType enum mirroring the value variants
//! - Supertype computation for list literals and branches
//! - Assignability checks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static type of a Cypher expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CypherType {
    // === Special Types ===
    /// Supertype of all types, also the type of `null`
    Any,

    // === Primitive Types ===
    Boolean,
    Integer,
    Float,
    /// Integer or Float
    Number,
    String,

    // === Collection Types ===
    /// List of elements
    #[serde(rename = "List")]
    List(Box<CypherType>),
    Map,

    // === Graph Types ===
    Node,
    Relationship,
    Path,

    // === Temporal Types ===
    Date,
    Time,
    LocalDateTime,
    DateTime,
    Duration,
}

impl CypherType {
    /// Create a list type
    pub fn list(element_type: CypherType) -> Self {
        Self::List(Box::new(element_type))
    }

    /// Check if this is the Any type
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Check if this is Integer, Float or Number
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Number)
    }

    /// Check if this is one of the temporal types
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Time | Self::LocalDateTime | Self::DateTime | Self::Duration
        )
    }

    /// Element type of a list, `None` for non-list types
    pub fn element_type(&self) -> Option<&CypherType> {
        match self {
            Self::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Type name as written in Cypher (`INTEGER`, `LIST<STRING>`, ...)
    pub fn name(&self) -> String {
        match self {
            Self::List(inner) => format!("LIST<{}>", inner.name()),
            other => other.simple_name().to_string(),
        }
    }

    fn simple_name(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::Boolean => "BOOLEAN",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::List(_) => "LIST",
            Self::Map => "MAP",
            Self::Node => "NODE",
            Self::Relationship => "RELATIONSHIP",
            Self::Path => "PATH",
            Self::Date => "DATE",
            Self::Time => "LOCAL TIME",
            Self::LocalDateTime => "LOCAL DATETIME",
            Self::DateTime => "ZONED DATETIME",
            Self::Duration => "DURATION",
        }
    }

    /// Whether a value of type `other` can be used where `self` is expected
    pub fn accepts(&self, other: &CypherType) -> bool {
        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => true,
            (Self::Number, t) => t.is_numeric(),
            (Self::List(a), Self::List(b)) => a.accepts(b),
            (a, b) => a == b,
        }
    }

    /// Smallest common supertype of two types
    pub fn common_supertype(&self, other: &CypherType) -> CypherType {
        match (self, other) {
            (a, b) if a == b => a.clone(),
            (Self::Any, t) | (t, Self::Any) => t.clone(),
            (a, b) if a.is_numeric() && b.is_numeric() => Self::Number,
            (Self::List(a), Self::List(b)) => Self::list(a.common_supertype(b)),
            _ => Self::Any,
        }
    }

    /// Supertype of every type in the iterator, `Any` when empty
    pub fn unify<'a>(types: impl IntoIterator<Item = &'a CypherType>) -> CypherType {
        let mut iter = types.into_iter();
        match iter.next() {
            None => Self::Any,
            Some(first) => iter.fold(first.clone(), |acc, t| acc.common_supertype(t)),
        }
    }
}

impl fmt::Display for CypherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
