//! Node registry: `TypedId` -> `Node`

use super::node::Node;
use super::types::TypedId;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: FxHashMap<TypedId, Node>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodeRegistry {
            nodes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert `node`, or merge its attributes over an existing node with the
    /// same identity. Returns true when the node was newly inserted.
    pub fn add_node(&mut self, node: Node) -> bool {
        match self.nodes.get_mut(node.id()) {
            Some(existing) => {
                existing.set_all(node.attributes().clone());
                false
            }
            None => {
                self.nodes.insert(node.id().clone(), node);
                true
            }
        }
    }

    pub fn get_node(&self, id: &TypedId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: &TypedId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn has_node(&self, id: &TypedId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Return the node for `id`, materializing a bare one if absent
    pub fn get_or_insert(&mut self, id: &TypedId) -> &mut Node {
        self.nodes
            .entry(id.clone())
            .or_insert_with(|| Node::new(id.clone()))
    }

    /// Remove a node; removing an unknown node is a no-op
    pub fn del_node(&mut self, id: &TypedId) -> Option<Node> {
        self.nodes.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn nodes_of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes
            .values()
            .filter(move |n| n.id().type_name() == type_name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
