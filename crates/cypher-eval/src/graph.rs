//! Graph collaborator used by pattern expressions
//!
//! The evaluator never walks storage itself. Pattern expressions are
//! translated into [`NodeFilter`]/[`RelationshipFilter`] records and handed to
//! a [`GraphModel`], which returns the matching paths.

use cypher_ast::Direction;
use cypher_types::{CypherNode, CypherPath, CypherRelationship, PathElement, Properties};
use thiserror::Error;

/// Errors reported by a graph implementation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The request is outside what the graph can answer
    #[error("unsupported graph request: {message}")]
    Unsupported { message: String },

    /// The backing store failed
    #[error("graph backend failure: {message}")]
    Backend { message: String },
}

/// Constraint on a node: required labels and property equalities
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeFilter {
    pub labels: Vec<String>,
    pub properties: Properties,
}

impl NodeFilter {
    pub fn new(labels: Vec<String>, properties: Properties) -> Self {
        Self { labels, properties }
    }

    /// Whether `node` carries every label and property of the filter
    pub fn matches(&self, node: &CypherNode) -> bool {
        self.labels.iter().all(|l| node.has_label(l))
            && properties_match(&self.properties, &node.properties)
    }
}

/// Constraint on a relationship: allowed types (any of) and property equalities
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelationshipFilter {
    pub types: Vec<String>,
    pub properties: Properties,
}

impl RelationshipFilter {
    pub fn new(types: Vec<String>, properties: Properties) -> Self {
        Self { types, properties }
    }

    /// Whether `rel` has an allowed type and every property of the filter
    pub fn matches(&self, rel: &CypherRelationship) -> bool {
        (self.types.is_empty() || self.types.iter().any(|t| *t == rel.rel_type))
            && properties_match(&self.properties, &rel.properties)
    }
}

/// A null constraint never matches, as `{key: null}` never equals anything
fn properties_match(required: &Properties, actual: &Properties) -> bool {
    required.iter().all(|(key, expected)| {
        !expected.is_null() && actual.get(key).is_some_and(|v| v == expected)
    })
}

/// Read access to the graph for pattern expressions
#[cfg_attr(test, mockall::automock)]
pub trait GraphModel: Send + Sync {
    /// All paths from a node matching `start` to a node matching `end`,
    /// traversing between `min_hops` and `max_hops` relationships that match
    /// `relationship` in the given direction.
    fn paths(
        &self,
        start: &NodeFilter,
        relationship: &RelationshipFilter,
        end: &NodeFilter,
        direction: Direction,
        min_hops: u32,
        max_hops: u32,
    ) -> Result<Vec<CypherPath>, GraphError>;
}

/// A small in-memory graph answering single-hop requests
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    nodes: Vec<CypherNode>,
    relationships: Vec<CypherRelationship>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: CypherNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_relationship(mut self, rel: CypherRelationship) -> Self {
        self.relationships.push(rel);
        self
    }

    pub fn node(&self, id: i64) -> Option<&CypherNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn hop(
        &self,
        rel: &CypherRelationship,
        from: i64,
        to: i64,
        start: &NodeFilter,
        end: &NodeFilter,
    ) -> Result<Option<CypherPath>, GraphError> {
        let (Some(from), Some(to)) = (self.node(from), self.node(to)) else {
            return Err(GraphError::Backend {
                message: format!("relationship {} refers to a missing node", rel.id),
            });
        };
        if !start.matches(from) || !end.matches(to) {
            return Ok(None);
        }
        CypherPath::from_elements([
            PathElement::Node(from.clone()),
            PathElement::Relationship(rel.clone()),
            PathElement::Node(to.clone()),
        ])
        .map(Some)
        .map_err(|e| GraphError::Backend {
            message: e.to_string(),
        })
    }
}

impl GraphModel for MemoryGraph {
    fn paths(
        &self,
        start: &NodeFilter,
        relationship: &RelationshipFilter,
        end: &NodeFilter,
        direction: Direction,
        min_hops: u32,
        max_hops: u32,
    ) -> Result<Vec<CypherPath>, GraphError> {
        if min_hops != 1 || max_hops != 1 {
            return Err(GraphError::Unsupported {
                message: format!("{min_hops}..{max_hops} hops"),
            });
        }

        let mut paths = Vec::new();
        for rel in self.relationships.iter().filter(|r| relationship.matches(r)) {
            let forward = (rel.start, rel.end);
            let backward = (rel.end, rel.start);
            let orientations = match direction {
                Direction::Outgoing => vec![forward],
                Direction::Incoming => vec![backward],
                Direction::Both if rel.start == rel.end => vec![forward],
                Direction::Both => vec![forward, backward],
            };
            for (from, to) in orientations {
                if let Some(path) = self.hop(rel, from, to, start, end)? {
                    paths.push(path);
                }
            }
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cypher_types::CypherValue;
    use pretty_assertions::assert_eq;

    fn graph() -> MemoryGraph {
        MemoryGraph::new()
            .with_node(CypherNode::new(1).with_label("Person").with_property("name", "Alice"))
            .with_node(CypherNode::new(2).with_label("Person").with_property("name", "Bob"))
            .with_node(CypherNode::new(3).with_label("City"))
            .with_relationship(CypherRelationship::new(10, "KNOWS", 1, 2))
            .with_relationship(CypherRelationship::new(11, "LIVES_IN", 1, 3))
    }

    fn person() -> NodeFilter {
        NodeFilter::new(vec!["Person".into()], Properties::new())
    }

    #[test]
    fn test_outgoing() {
        let paths = graph()
            .paths(&person(), &RelationshipFilter::default(), &person(), Direction::Outgoing, 1, 1)
            .unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].start().id, 1);
        assert_eq!(paths[0].end().id, 2);
    }

    #[test]
    fn test_both_directions() {
        let paths = graph()
            .paths(&person(), &RelationshipFilter::default(), &person(), Direction::Both, 1, 1)
            .unwrap();
        let ends: Vec<(i64, i64)> = paths.iter().map(|p| (p.start().id, p.end().id)).collect();
        assert_eq!(ends, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn test_property_and_type_filters() {
        let alice = NodeFilter::new(
            vec![],
            Properties::from([("name".to_string(), CypherValue::from("Alice"))]),
        );
        let lives_in = RelationshipFilter::new(vec!["LIVES_IN".into()], Properties::new());
        let paths = graph()
            .paths(&alice, &lives_in, &NodeFilter::default(), Direction::Outgoing, 1, 1)
            .unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].end().id, 3);
    }

    #[test]
    fn test_null_property_never_matches() {
        let filter = NodeFilter::new(
            vec![],
            Properties::from([("name".to_string(), CypherValue::Null)]),
        );
        assert!(!filter.matches(&CypherNode::new(1)));
    }

    #[test]
    fn test_multi_hop_is_rejected() {
        let result = graph().paths(
            &NodeFilter::default(),
            &RelationshipFilter::default(),
            &NodeFilter::default(),
            Direction::Outgoing,
            1,
            3,
        );
        assert!(matches!(result, Err(GraphError::Unsupported { .. })));
    }
}
