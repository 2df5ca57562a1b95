//! Node implementation for the typed property graph
//!
//! A node is a `TypedId` plus an attribute bag. The reserved `_type` and
//! `_id` attributes always mirror the identity; writes to them are
//! overwritten, never merged.

use super::property::{Attributes, PropertyValue};
use super::store::GraphResult;
use super::types::{TypedId, ID_KEY, TYPE_KEY};
use serde::{Deserialize, Serialize};

/// Rewrite the reserved keys of `attrs` from `id`
pub(crate) fn stamp_identity(attrs: &mut Attributes, id: &TypedId) {
    attrs.set(TYPE_KEY, id.type_name());
    attrs.set(ID_KEY, id.id());
}

/// A node in the property graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeRecord")]
pub struct Node {
    id: TypedId,
    attributes: Attributes,
}

/// Serialized form of a node; loading re-stamps the reserved keys
#[derive(Deserialize)]
struct NodeRecord {
    id: TypedId,
    #[serde(default)]
    attributes: Attributes,
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        Node::with_attributes(record.id, record.attributes)
    }
}

impl Node {
    /// Create a node carrying only its reserved attributes
    pub fn new(id: impl Into<TypedId>) -> Self {
        let id = id.into();
        let mut attributes = Attributes::new();
        stamp_identity(&mut attributes, &id);
        Node { id, attributes }
    }

    /// Create a node with user attributes
    pub fn with_attributes<K, V>(
        id: impl Into<TypedId>,
        attrs: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        let mut node = Node::new(id);
        node.set_all(attrs);
        node
    }

    /// Build a node from a bare attribute map
    ///
    /// The identity is read from `_type` and `_id`. A missing or empty `_id`
    /// gets a generated one; a missing or empty `_type` falls back to
    /// `default_type`.
    pub fn from_attributes(attrs: Attributes, default_type: &str) -> Self {
        let type_name = match attrs.get_string(TYPE_KEY) {
            t if t.is_empty() => default_type.to_string(),
            t => t,
        };
        let id = match attrs.get_string(ID_KEY) {
            i if i.is_empty() => TypedId::generate(type_name),
            i => TypedId::new(type_name, i),
        };
        Node::with_attributes(id, attrs)
    }

    pub fn id(&self) -> &TypedId {
        &self.id
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }

    pub fn get_string(&self, key: &str) -> String {
        self.attributes.get_string(key)
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.attributes.get_int(key)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.attributes.get_bool(key)
    }

    /// Set one attribute; reserved keys keep reflecting the identity
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.attributes.set(key, value);
        stamp_identity(&mut self.attributes, &self.id);
    }

    /// Merge attributes, overwriting existing keys
    pub fn set_all<K, V>(&mut self, attrs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.attributes.set_all(attrs);
        stamp_identity(&mut self.attributes, &self.id);
    }

    /// Remove a user attribute; reserved keys cannot be removed
    pub fn del(&mut self, key: &str) -> Option<PropertyValue> {
        if key == TYPE_KEY || key == ID_KEY {
            return None;
        }
        self.attributes.del(key)
    }

    pub fn range<F>(&self, visitor: F)
    where
        F: FnMut(&str, &PropertyValue) -> bool,
    {
        self.attributes.range(visitor)
    }

    pub fn to_json(&self) -> GraphResult<Vec<u8>> {
        self.attributes.to_json()
    }

    /// Merge a JSON object into the attributes, ignoring `_type`/`_id`
    pub fn merge_json(&mut self, bytes: &[u8]) -> GraphResult<()> {
        self.attributes.merge_json(bytes)?;
        stamp_identity(&mut self.attributes, &self.id);
        Ok(())
    }
}
