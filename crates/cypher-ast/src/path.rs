//! Step chains describing how to rebuild a path value

use crate::{BoxExpr, OptBoxExpr};
use serde::{Deserialize, Serialize};

/// One link of a path-construction chain.
///
/// A chain always begins with [`PathStep::Node`] and ends with
/// [`PathStep::End`]. Multi-hop segments refer to a path that was matched
/// earlier and is bound on the evaluation context under the relationship
/// variable's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathStep {
    /// End of the chain
    End,
    /// Start at (or pass through) a node
    Node { node: BoxExpr, next: Box<PathStep> },
    /// Traverse a single relationship to a destination node
    Relationship {
        relationship: BoxExpr,
        node: OptBoxExpr,
        next: Box<PathStep>,
    },
    /// Splice in a previously matched variable-length segment
    MultiHop {
        relationship: String,
        next: Box<PathStep>,
    },
}

impl PathStep {
    /// `Node` step
    pub fn node(node: BoxExpr, next: PathStep) -> Self {
        Self::Node {
            node,
            next: Box::new(next),
        }
    }

    /// `Relationship` step
    pub fn relationship(relationship: BoxExpr, node: BoxExpr, next: PathStep) -> Self {
        Self::Relationship {
            relationship,
            node: Some(node),
            next: Box::new(next),
        }
    }

    /// `MultiHop` step
    pub fn multi_hop(relationship: impl Into<String>, next: PathStep) -> Self {
        Self::MultiHop {
            relationship: relationship.into(),
            next: Box::new(next),
        }
    }

    /// Whether this is the terminal step
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}
