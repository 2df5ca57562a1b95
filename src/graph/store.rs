//! In-memory graph storage
//!
//! `GraphStore` composes the node registry and the edge index and is the
//! only place structural changes happen. It is a plain single-owner value;
//! share it across threads through [`crate::graph::Graph`].

use super::adjacency::{Direction, EdgeIndex};
use super::edge::Edge;
use super::node::Node;
use super::property::PropertyValue;
use super::registry::NodeRegistry;
use super::types::TypedId;
use crate::config::GraphConfig;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Edge endpoint {0} does not exist")]
    EndpointNotFound(TypedId),

    #[error("Node {0} not found")]
    NodeNotFound(TypedId),

    #[error("Edge {0} not found")]
    EdgeNotFound(TypedId),

    #[error("Failed to create edge: {0}")]
    EdgeCreationFailure(String),

    #[error("Invalid JSON attributes: {0}")]
    InvalidJson(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes: TypedId -> Node
/// - edges: TypedId -> Edge, with outgoing/incoming adjacency by relationship
#[derive(Debug)]
pub struct GraphStore {
    nodes: NodeRegistry,
    edges: EdgeIndex,
    config: GraphConfig,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        GraphStore {
            nodes: NodeRegistry::with_capacity(config.initial_node_capacity),
            edges: EdgeIndex::with_capacity(config.initial_edge_capacity),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // === Nodes ===

    /// Insert a node, or merge its attributes into the existing node with the
    /// same identity
    pub fn add_node(&mut self, node: Node) {
        let id = node.id().clone();
        let inserted = self.nodes.add_node(node);
        debug!(node = %id, inserted, "add_node");
    }

    /// Build a node from a bare attribute map (see [`Node::from_attributes`])
    /// and upsert it, returning its identity
    pub fn add_node_from_attributes<K, V>(
        &mut self,
        attrs: impl IntoIterator<Item = (K, V)>,
    ) -> TypedId
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        let node =
            Node::from_attributes(attrs.into_iter().collect(), &self.config.default_node_type);
        let id = node.id().clone();
        self.add_node(node);
        id
    }

    pub fn get_node(&self, id: &TypedId) -> Option<&Node> {
        self.nodes.get_node(id)
    }

    pub fn has_node(&self, id: &TypedId) -> bool {
        self.nodes.has_node(id)
    }

    /// Upsert-on-access: the node for `id`, materialized bare if absent
    pub fn get_or_insert_node(&mut self, id: &TypedId) -> &mut Node {
        if !self.nodes.has_node(id) {
            debug!(node = %id, "materializing node on access");
        }
        self.nodes.get_or_insert(id)
    }

    /// Merge `attrs` into the node, materializing it first if needed
    pub fn patch_node<K, V>(&mut self, id: &TypedId, attrs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.get_or_insert_node(id).set_all(attrs);
    }

    pub fn set_node_attribute(
        &mut self,
        id: &TypedId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let node = self
            .nodes
            .get_node_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        node.set(key, value);
        Ok(())
    }

    pub fn del_node_attribute(
        &mut self,
        id: &TypedId,
        key: &str,
    ) -> GraphResult<Option<PropertyValue>> {
        let node = self
            .nodes
            .get_node_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        Ok(node.del(key))
    }

    pub fn node_to_json(&self, id: &TypedId) -> GraphResult<Vec<u8>> {
        self.get_node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?
            .to_json()
    }

    /// Merge a JSON object into the node, materializing it first if needed
    pub fn node_merge_json(&mut self, id: &TypedId, bytes: &[u8]) -> GraphResult<()> {
        self.get_or_insert_node(id).merge_json(bytes)
    }

    /// Delete a node and all its connected edges
    ///
    /// Deleting an unknown node is a no-op.
    pub fn del_node(&mut self, id: &TypedId) -> Option<Node> {
        let node = self.nodes.del_node(id)?;
        let removed = self.edges.remove_incident(id);
        debug!(node = %id, edges_removed = removed.len(), "del_node");
        Some(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn nodes_of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.nodes_of_type(type_name)
    }

    // === Edges ===

    /// Index an edge between two existing nodes
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<()> {
        for endpoint in [edge.from(), edge.to()] {
            if !self.nodes.has_node(endpoint) {
                return Err(GraphError::EndpointNotFound(endpoint.clone()));
            }
        }
        debug!(edge = %edge.id(), from = %edge.from(), to = %edge.to(), "add_edge");
        self.edges.insert(edge)
    }

    pub fn get_edge(&self, id: &TypedId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn has_edge(&self, id: &TypedId) -> bool {
        self.edges.contains(id)
    }

    /// Merge `attrs` into an existing edge
    pub fn patch_edge<K, V>(
        &mut self,
        id: &TypedId,
        attrs: impl IntoIterator<Item = (K, V)>,
    ) -> GraphResult<()>
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        let edge = self
            .edges
            .get_mut(id)
            .ok_or_else(|| GraphError::EdgeNotFound(id.clone()))?;
        edge.set_all(attrs);
        Ok(())
    }

    pub fn del_edge(&mut self, id: &TypedId) -> GraphResult<Edge> {
        let edge = self
            .edges
            .remove(id)
            .ok_or_else(|| GraphError::EdgeNotFound(id.clone()))?;
        debug!(edge = %id, "del_edge");
        Ok(edge)
    }

    /// Visit outgoing edges of `edge_type` in insertion order until `visitor`
    /// returns false
    pub fn edges_from<F>(&self, edge_type: &str, source: &TypedId, visitor: F)
    where
        F: FnMut(&Edge) -> bool,
    {
        self.edges.edges_from(edge_type, source, visitor)
    }

    /// Visit incoming edges of `edge_type` in insertion order until `visitor`
    /// returns false
    pub fn edges_to<F>(&self, edge_type: &str, target: &TypedId, visitor: F)
    where
        F: FnMut(&Edge) -> bool,
    {
        self.edges.edges_to(edge_type, target, visitor)
    }

    /// Collect outgoing edges of `edge_type` that pass `filter`
    pub fn filter_edges_from<F>(&self, edge_type: &str, source: &TypedId, filter: F) -> Vec<Edge>
    where
        F: Fn(&Edge) -> bool,
    {
        self.collect_edges(Direction::Outgoing, edge_type, source, filter)
    }

    /// Collect incoming edges of `edge_type` that pass `filter`
    pub fn filter_edges_to<F>(&self, edge_type: &str, target: &TypedId, filter: F) -> Vec<Edge>
    where
        F: Fn(&Edge) -> bool,
    {
        self.collect_edges(Direction::Incoming, edge_type, target, filter)
    }

    fn collect_edges<F>(
        &self,
        direction: Direction,
        edge_type: &str,
        anchor: &TypedId,
        filter: F,
    ) -> Vec<Edge>
    where
        F: Fn(&Edge) -> bool,
    {
        let mut out = Vec::new();
        self.edges.visit(direction, edge_type, anchor, |edge| {
            if filter(edge) {
                out.push(edge.clone());
            }
            true
        });
        out
    }

    pub(crate) fn edge_at(
        &self,
        direction: Direction,
        edge_type: &str,
        anchor: &TypedId,
        pos: usize,
    ) -> Option<&Edge> {
        self.edges.edge_at(direction, edge_type, anchor, pos)
    }

    pub fn degree(&self, id: &TypedId) -> usize {
        self.edges.degree(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    // === Statistics ===

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Clear all data from the graph
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
