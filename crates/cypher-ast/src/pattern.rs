//! Graph pattern nodes used by pattern expressions and pattern comprehensions

use crate::{Expression, OptBoxExpr};
use serde::{Deserialize, Serialize};

/// Traversal direction of a relationship pattern, relative to the left node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// `(a)-[]->(b)`
    Outgoing,
    /// `(a)<-[]-(b)`
    Incoming,
    /// `(a)-[]-(b)`
    #[default]
    Both,
}

/// A node pattern: `(var:Label {key: expr})`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodePattern {
    /// Optional variable name
    pub variable: Option<String>,
    /// Required labels
    pub labels: Vec<String>,
    /// Property constraints, each value an expression evaluated per row
    pub properties: Vec<(String, Expression)>,
}

impl NodePattern {
    /// An anonymous node pattern with no constraints
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A node pattern bound to a variable
    pub fn named(variable: impl Into<String>) -> Self {
        Self {
            variable: Some(variable.into()),
            ..Self::default()
        }
    }

    /// Add a required label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Add a property constraint
    pub fn with_property(mut self, key: impl Into<String>, value: Expression) -> Self {
        self.properties.push((key.into(), value));
        self
    }
}

/// Length range of a variable-length relationship (`*min..max`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternLength {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// A relationship pattern: `-[var:TYPE {key: expr}]->`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelationshipPattern {
    /// Optional variable name
    pub variable: Option<String>,
    /// Allowed relationship types (any of)
    pub types: Vec<String>,
    /// Property constraints
    pub properties: Vec<(String, Expression)>,
    /// Traversal direction
    pub direction: Direction,
    /// Variable-length range, `None` for a single hop
    pub length: Option<PatternLength>,
}

impl RelationshipPattern {
    /// A relationship pattern with the given direction
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Bind the relationship to a variable
    pub fn named(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// Add an allowed relationship type
    pub fn with_type(mut self, rel_type: impl Into<String>) -> Self {
        self.types.push(rel_type.into());
        self
    }

    /// Add a property constraint
    pub fn with_property(mut self, key: impl Into<String>, value: Expression) -> Self {
        self.properties.push((key.into(), value));
        self
    }

    /// Make this a variable-length relationship
    pub fn with_length(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.length = Some(PatternLength { min, max });
        self
    }

    /// Whether this pattern spans exactly one hop
    pub fn is_single_hop(&self) -> bool {
        match self.length {
            None => true,
            Some(PatternLength { min, max }) => min == Some(1) && max == Some(1),
        }
    }
}

/// A chain of node and relationship patterns:
/// `(start)-[r1]-(n1)-[r2]-(n2)...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipsPattern {
    /// Leftmost node
    pub start: NodePattern,
    /// Subsequent (relationship, node) hops
    pub chain: Vec<(RelationshipPattern, NodePattern)>,
}

impl RelationshipsPattern {
    /// A single-hop pattern
    pub fn one_hop(start: NodePattern, relationship: RelationshipPattern, end: NodePattern) -> Self {
        Self {
            start,
            chain: vec![(relationship, end)],
        }
    }

    /// Number of relationship hops in the chain
    pub fn hops(&self) -> usize {
        self.chain.len()
    }
}

/// Pattern comprehension: `[p = (a)-->(b) WHERE pred | projection]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternComprehension {
    /// Optional path variable
    pub path_variable: Option<String>,
    /// The pattern to match
    pub pattern: RelationshipsPattern,
    /// Optional filter
    pub predicate: OptBoxExpr,
    /// Projection evaluated per match
    pub projection: Box<Expression>,
}
