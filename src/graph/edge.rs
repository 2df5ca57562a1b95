//! Edge implementation for the typed property graph
//!
//! An edge has its own `TypedId` whose type is the relationship name, a
//! source (`from`) and target (`to`) node, and an attribute bag.

use super::node::stamp_identity;
use super::property::{Attributes, PropertyValue};
use super::store::GraphResult;
use super::types::{TypedId, ID_KEY, TYPE_KEY};
use serde::{Deserialize, Serialize};

/// A directed edge in the property graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "EdgeRecord")]
pub struct Edge {
    /// Identity; the type is the relationship name
    id: TypedId,

    /// Source node (edge goes FROM this node)
    from: TypedId,

    /// Target node (edge goes TO this node)
    to: TypedId,

    attributes: Attributes,
}

/// Serialized form of an edge; loading re-stamps the reserved keys
#[derive(Deserialize)]
struct EdgeRecord {
    id: TypedId,
    from: TypedId,
    to: TypedId,
    #[serde(default)]
    attributes: Attributes,
}

impl From<EdgeRecord> for Edge {
    fn from(record: EdgeRecord) -> Self {
        let mut edge = Edge::with_id(record.id, record.from, record.to);
        edge.set_all(record.attributes);
        edge
    }
}

impl Edge {
    /// Create a new directed edge with a generated id
    pub fn new(relationship: impl Into<String>, from: TypedId, to: TypedId) -> Self {
        Edge::with_id(TypedId::generate(relationship), from, to)
    }

    /// Create a new directed edge with an explicit identity
    pub fn with_id(id: TypedId, from: TypedId, to: TypedId) -> Self {
        let mut attributes = Attributes::new();
        stamp_identity(&mut attributes, &id);
        Edge {
            id,
            from,
            to,
            attributes,
        }
    }

    pub fn id(&self) -> &TypedId {
        &self.id
    }

    /// Relationship name (the edge's type)
    pub fn relationship(&self) -> &str {
        self.id.type_name()
    }

    pub fn from(&self) -> &TypedId {
        &self.from
    }

    pub fn to(&self) -> &TypedId {
        &self.to
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.attributes.set(key, value);
        stamp_identity(&mut self.attributes, &self.id);
    }

    pub fn set_all<K, V>(&mut self, attrs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.attributes.set_all(attrs);
        stamp_identity(&mut self.attributes, &self.id);
    }

    pub fn del(&mut self, key: &str) -> Option<PropertyValue> {
        if key == TYPE_KEY || key == ID_KEY {
            return None;
        }
        self.attributes.del(key)
    }

    pub fn to_json(&self) -> GraphResult<Vec<u8>> {
        self.attributes.to_json()
    }

    pub fn merge_json(&mut self, bytes: &[u8]) -> GraphResult<()> {
        self.attributes.merge_json(bytes)?;
        stamp_identity(&mut self.attributes, &self.id);
        Ok(())
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, a: &TypedId, b: &TypedId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }

    pub fn starts_from(&self, node: &TypedId) -> bool {
        &self.from == node
    }

    pub fn ends_at(&self, node: &TypedId) -> bool {
        &self.to == node
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
