//! Wrapping of host JSON values (parameters, results) as Cypher values

use crate::{CypherValue, Properties};
use serde_json::{Map, Number, Value as JsonValue};

impl CypherValue {
    /// Wrap a JSON value.
    ///
    /// Integral numbers that fit in `i64` become Integer, every other number
    /// becomes Float. Objects become maps.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Boolean(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            JsonValue::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert to JSON.
    ///
    /// Graph entities become objects with their identity fields, temporal
    /// values become their ISO strings, and non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Boolean(b) => JsonValue::Bool(*b),
            Self::Integer(i) => JsonValue::from(*i),
            Self::Float(x) => Number::from_f64(*x).map_or(JsonValue::Null, JsonValue::Number),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => properties_to_json(map),
            Self::Node(node) => {
                let mut obj = Map::new();
                obj.insert("id".into(), JsonValue::from(node.id));
                obj.insert(
                    "labels".into(),
                    JsonValue::Array(node.labels.iter().cloned().map(JsonValue::String).collect()),
                );
                obj.insert("properties".into(), properties_to_json(&node.properties));
                JsonValue::Object(obj)
            }
            Self::Relationship(rel) => {
                let mut obj = Map::new();
                obj.insert("id".into(), JsonValue::from(rel.id));
                obj.insert("type".into(), JsonValue::String(rel.rel_type.clone()));
                obj.insert("start".into(), JsonValue::from(rel.start));
                obj.insert("end".into(), JsonValue::from(rel.end));
                obj.insert("properties".into(), properties_to_json(&rel.properties));
                JsonValue::Object(obj)
            }
            Self::Path(path) => {
                let mut obj = Map::new();
                obj.insert(
                    "nodes".into(),
                    JsonValue::Array(
                        path.nodes()
                            .iter()
                            .map(|n| Self::Node(n.clone()).to_json())
                            .collect(),
                    ),
                );
                obj.insert(
                    "relationships".into(),
                    JsonValue::Array(
                        path.relationships()
                            .iter()
                            .map(|r| Self::Relationship(r.clone()).to_json())
                            .collect(),
                    ),
                );
                JsonValue::Object(obj)
            }
            Self::Date(_)
            | Self::Time(_)
            | Self::LocalDateTime(_)
            | Self::DateTime(_)
            | Self::Duration(_) => JsonValue::String(self.to_string()),
        }
    }
}

fn properties_to_json(properties: &Properties) -> JsonValue {
    JsonValue::Object(
        properties
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

impl From<JsonValue> for CypherValue {
    fn from(value: JsonValue) -> Self {
        Self::from_json(value)
    }
}
