//! Cypher Value types - runtime representation of all Cypher values
//!
//! This module defines the CypherValue enum and the graph entity types
//! (nodes, relationships, paths) it carries.

use crate::temporal::{date_component, time_component};
use crate::{CypherDuration, CypherType, ValueError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Property map of a node, relationship or map value
pub type Properties = IndexMap<String, CypherValue>;

/// The primary value type for Cypher runtime values.
///
/// Equality is structural and requires the same variant; the numeric
/// equivalence of `1` and `1.0` is an operator concern, not a value one.
/// Map equality ignores key order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CypherValue {
    // === Primitive Types ===
    /// Null value (missing/unknown)
    #[default]
    Null,
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit IEEE float
    Float(f64),
    String(String),

    // === Collection Types ===
    List(Vec<CypherValue>),
    Map(Properties),

    // === Graph Types ===
    Node(CypherNode),
    Relationship(CypherRelationship),
    Path(CypherPath),

    // === Temporal Types ===
    Date(NaiveDate),
    /// Local time of day
    Time(NaiveTime),
    LocalDateTime(NaiveDateTime),
    /// Datetime with a fixed UTC offset
    DateTime(DateTime<FixedOffset>),
    Duration(CypherDuration),
}

impl CypherValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this value is the Boolean `true`
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Boolean(true))
    }

    /// Check if this value is Integer or Float
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Variant name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Boolean(_) => "Boolean",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Node(_) => "Node",
            Self::Relationship(_) => "Relationship",
            Self::Path(_) => "Path",
            Self::Date(_) => "Date",
            Self::Time(_) => "Time",
            Self::LocalDateTime(_) => "LocalDateTime",
            Self::DateTime(_) => "DateTime",
            Self::Duration(_) => "Duration",
        }
    }

    /// Get the Cypher type of this value
    pub fn get_type(&self) -> CypherType {
        match self {
            Self::Null => CypherType::Any,
            Self::Boolean(_) => CypherType::Boolean,
            Self::Integer(_) => CypherType::Integer,
            Self::Float(_) => CypherType::Float,
            Self::String(_) => CypherType::String,
            Self::List(items) => {
                let types: Vec<CypherType> = items.iter().map(Self::get_type).collect();
                CypherType::list(CypherType::unify(&types))
            }
            Self::Map(_) => CypherType::Map,
            Self::Node(_) => CypherType::Node,
            Self::Relationship(_) => CypherType::Relationship,
            Self::Path(_) => CypherType::Path,
            Self::Date(_) => CypherType::Date,
            Self::Time(_) => CypherType::Time,
            Self::LocalDateTime(_) => CypherType::LocalDateTime,
            Self::DateTime(_) => CypherType::DateTime,
            Self::Duration(_) => CypherType::Duration,
        }
    }

    // === Accessors ===

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as Float, promoting Integer
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[CypherValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Properties> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&CypherNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_relationship(&self) -> Option<&CypherRelationship> {
        match self {
            Self::Relationship(rel) => Some(rel),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&CypherPath> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<&CypherDuration> {
        match self {
            Self::Duration(d) => Some(d),
            _ => None,
        }
    }

    // === Checked accessors ===

    fn mismatch(&self, expected: &str) -> ValueError {
        ValueError::type_mismatch(expected, self.type_name())
    }

    pub fn expect_boolean(&self) -> Result<bool, ValueError> {
        self.as_boolean().ok_or_else(|| self.mismatch("Boolean"))
    }

    pub fn expect_integer(&self) -> Result<i64, ValueError> {
        self.as_integer().ok_or_else(|| self.mismatch("Integer"))
    }

    pub fn expect_float(&self) -> Result<f64, ValueError> {
        self.as_float().ok_or_else(|| self.mismatch("Float"))
    }

    pub fn expect_str(&self) -> Result<&str, ValueError> {
        self.as_str().ok_or_else(|| self.mismatch("String"))
    }

    pub fn expect_list(&self) -> Result<&[CypherValue], ValueError> {
        self.as_list().ok_or_else(|| self.mismatch("List"))
    }

    pub fn expect_map(&self) -> Result<&Properties, ValueError> {
        self.as_map().ok_or_else(|| self.mismatch("Map"))
    }

    pub fn expect_node(&self) -> Result<&CypherNode, ValueError> {
        self.as_node().ok_or_else(|| self.mismatch("Node"))
    }

    pub fn expect_relationship(&self) -> Result<&CypherRelationship, ValueError> {
        self.as_relationship()
            .ok_or_else(|| self.mismatch("Relationship"))
    }

    pub fn expect_path(&self) -> Result<&CypherPath, ValueError> {
        self.as_path().ok_or_else(|| self.mismatch("Path"))
    }

    // === Constructors ===

    pub fn null() -> Self {
        Self::Null
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn list(items: impl IntoIterator<Item = CypherValue>) -> Self {
        Self::List(items.into_iter().collect())
    }

    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, CypherValue)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Property or component lookup used by `value.key`.
    ///
    /// Maps, nodes and relationships look up the key; temporal values expose
    /// their calendar components. Returns `None` when the value has no such
    /// key, and also for variants that have no properties at all.
    pub fn component(&self, key: &str) -> Option<CypherValue> {
        match self {
            Self::Map(map) => map.get(key).cloned(),
            Self::Node(node) => node.properties.get(key).cloned(),
            Self::Relationship(rel) => rel.properties.get(key).cloned(),
            Self::Date(d) => date_component(d, key).map(Self::Integer),
            Self::Time(t) => time_component(t, key).map(Self::Integer),
            Self::LocalDateTime(dt) => date_component(&dt.date(), key)
                .or_else(|| time_component(&dt.time(), key))
                .map(Self::Integer),
            Self::DateTime(dt) => match key {
                "offset" => Some(Self::String(dt.offset().to_string())),
                "offsetSeconds" => Some(Self::Integer(i64::from(
                    dt.offset().local_minus_utc(),
                ))),
                "epochSeconds" => Some(Self::Integer(dt.timestamp())),
                "epochMillis" => Some(Self::Integer(dt.timestamp_millis())),
                _ => date_component(&dt.date_naive(), key)
                    .or_else(|| time_component(&dt.time(), key))
                    .map(Self::Integer),
            },
            Self::Duration(d) => d.component(key).map(Self::Integer),
            _ => None,
        }
    }

    /// Whether `component` is defined for this variant
    pub fn has_components(&self) -> bool {
        !matches!(
            self,
            Self::Null
                | Self::Boolean(_)
                | Self::Integer(_)
                | Self::Float(_)
                | Self::String(_)
                | Self::List(_)
                | Self::Path(_)
        )
    }

    /// Render for string concatenation: strings unquoted, everything else
    /// as [`Display`](fmt::Display)
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_finite() && x.fract() == 0.0 {
        write!(f, "{x:.1}")
    } else if x.is_nan() {
        f.write_str("NaN")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{x}")
    }
}

fn write_properties(f: &mut fmt::Formatter<'_>, properties: &Properties) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in properties.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: {value}")?;
    }
    f.write_str("}")
}

impl fmt::Display for CypherValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write_float(f, *x),
            Self::String(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => write_properties(f, map),
            Self::Node(node) => write!(f, "{node}"),
            Self::Relationship(rel) => write!(f, "{rel}"),
            Self::Path(path) => write!(f, "{path}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Self::LocalDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f%:z")),
            Self::Duration(d) => write!(f, "{d}"),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for CypherValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for CypherValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for CypherValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for CypherValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for CypherValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for CypherValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<CypherValue>> From<Vec<T>> for CypherValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CypherValue>> From<Option<T>> for CypherValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<CypherNode> for CypherValue {
    fn from(node: CypherNode) -> Self {
        Self::Node(node)
    }
}

impl From<CypherRelationship> for CypherValue {
    fn from(rel: CypherRelationship) -> Self {
        Self::Relationship(rel)
    }
}

impl From<CypherPath> for CypherValue {
    fn from(path: CypherPath) -> Self {
        Self::Path(path)
    }
}

impl From<NaiveDate> for CypherValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveTime> for CypherValue {
    fn from(t: NaiveTime) -> Self {
        Self::Time(t)
    }
}

impl From<NaiveDateTime> for CypherValue {
    fn from(dt: NaiveDateTime) -> Self {
        Self::LocalDateTime(dt)
    }
}

impl From<DateTime<FixedOffset>> for CypherValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<CypherDuration> for CypherValue {
    fn from(d: CypherDuration) -> Self {
        Self::Duration(d)
    }
}

// ============================================================================
// Graph Types
// ============================================================================

/// A graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherNode {
    pub id: i64,
    pub labels: SmallVec<[String; 2]>,
    pub properties: Properties,
}

impl CypherNode {
    /// Create a node with no labels or properties
    pub fn new(id: i64) -> Self {
        Self {
            id,
            labels: SmallVec::new(),
            properties: Properties::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

impl fmt::Display for CypherNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for label in &self.labels {
            write!(f, ":{label}")?;
        }
        if !self.properties.is_empty() {
            if !self.labels.is_empty() {
                f.write_str(" ")?;
            }
            write_properties(f, &self.properties)?;
        }
        f.write_str(")")
    }
}

/// A directed relationship between two nodes, `start -> end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherRelationship {
    pub id: i64,
    pub rel_type: String,
    pub start: i64,
    pub end: i64,
    pub properties: Properties,
}

impl CypherRelationship {
    pub fn new(id: i64, rel_type: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            id,
            rel_type: rel_type.into(),
            start,
            end,
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Whether the relationship touches both node ids, in either direction
    pub fn connects(&self, a: i64, b: i64) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// The endpoint opposite to `node_id`, if it is an endpoint at all
    pub fn other_end(&self, node_id: i64) -> Option<i64> {
        if self.start == node_id {
            Some(self.end)
        } else if self.end == node_id {
            Some(self.start)
        } else {
            None
        }
    }
}

impl fmt::Display for CypherRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[:{}", self.rel_type)?;
        if !self.properties.is_empty() {
            f.write_str(" ")?;
            write_properties(f, &self.properties)?;
        }
        f.write_str("]")
    }
}

/// One element of a path under construction
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    Node(CypherNode),
    Relationship(CypherRelationship),
}

/// A path: `nodes[0] -rels[0]- nodes[1] -rels[1]- ... nodes[n]`.
///
/// Always holds exactly one more node than relationships, and every
/// relationship connects its neighbouring nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPath")]
pub struct CypherPath {
    nodes: Vec<CypherNode>,
    relationships: Vec<CypherRelationship>,
}

/// Unchecked wire form of [`CypherPath`]
#[derive(Deserialize)]
struct RawPath {
    nodes: Vec<CypherNode>,
    relationships: Vec<CypherRelationship>,
}

impl TryFrom<RawPath> for CypherPath {
    type Error = ValueError;

    fn try_from(raw: RawPath) -> Result<Self, Self::Error> {
        if raw.nodes.len() != raw.relationships.len() + 1 {
            return Err(ValueError::invalid_path(format!(
                "{} nodes cannot be joined by {} relationships",
                raw.nodes.len(),
                raw.relationships.len()
            )));
        }
        let mut nodes = raw.nodes.into_iter();
        let mut path = match nodes.next() {
            Some(node) => Self::single(node),
            None => return Err(ValueError::invalid_path("path must contain a node")),
        };
        for (rel, node) in raw.relationships.into_iter().zip(nodes) {
            path.push(rel, node)?;
        }
        Ok(path)
    }
}

impl CypherPath {
    /// A zero-length path
    pub fn single(node: CypherNode) -> Self {
        Self {
            nodes: vec![node],
            relationships: Vec::new(),
        }
    }

    /// Build a path from an alternating element sequence
    pub fn from_elements(
        elements: impl IntoIterator<Item = PathElement>,
    ) -> Result<Self, ValueError> {
        let mut elements = elements.into_iter();
        let mut path = match elements.next() {
            Some(PathElement::Node(node)) => Self::single(node),
            Some(PathElement::Relationship(_)) => {
                return Err(ValueError::invalid_path("path must start with a node"));
            }
            None => return Err(ValueError::invalid_path("path must contain a node")),
        };

        while let Some(element) = elements.next() {
            let PathElement::Relationship(rel) = element else {
                return Err(ValueError::invalid_path(
                    "expected a relationship between two nodes",
                ));
            };
            let Some(PathElement::Node(node)) = elements.next() else {
                return Err(ValueError::invalid_path("path must end with a node"));
            };
            path.push(rel, node)?;
        }
        Ok(path)
    }

    /// Extend the path by one hop
    pub fn push(&mut self, rel: CypherRelationship, node: CypherNode) -> Result<(), ValueError> {
        let last = self.end().id;
        if !rel.connects(last, node.id) {
            return Err(ValueError::invalid_path(format!(
                "relationship {} does not connect nodes {} and {}",
                rel.id, last, node.id
            )));
        }
        self.relationships.push(rel);
        self.nodes.push(node);
        Ok(())
    }

    pub fn nodes(&self) -> &[CypherNode] {
        &self.nodes
    }

    pub fn relationships(&self) -> &[CypherRelationship] {
        &self.relationships
    }

    /// Number of relationships
    pub fn length(&self) -> usize {
        self.relationships.len()
    }

    pub fn start(&self) -> &CypherNode {
        &self.nodes[0]
    }

    pub fn end(&self) -> &CypherNode {
        &self.nodes[self.nodes.len() - 1]
    }

    /// The alternating element sequence
    pub fn elements(&self) -> Vec<PathElement> {
        let mut out = Vec::with_capacity(self.nodes.len() + self.relationships.len());
        out.push(PathElement::Node(self.start().clone()));
        for (rel, node) in self.relationships.iter().zip(&self.nodes[1..]) {
            out.push(PathElement::Relationship(rel.clone()));
            out.push(PathElement::Node(node.clone()));
        }
        out
    }
}

impl fmt::Display for CypherPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start())?;
        for (i, rel) in self.relationships.iter().enumerate() {
            let from = &self.nodes[i];
            let to = &self.nodes[i + 1];
            if rel.start == from.id {
                write!(f, "-{rel}->{to}")?;
            } else {
                write!(f, "<-{rel}-{to}")?;
            }
        }
        Ok(())
    }
}
