//! Shared, thread-safe handle to a graph
//!
//! `Graph` wraps a [`GraphStore`] in an `Arc<RwLock<_>>`. Lookups and walks
//! take the read lock and may run concurrently; every structural change
//! takes the write lock for its whole duration.
//!
//! Visitors and cursors run on the caller's thread while the read lock is
//! held. Calling a writing method on the same `Graph` from inside a visitor,
//! or while an [`EdgeCursor`] is alive, is not supported and will deadlock.

use super::adjacency::Direction;
use super::edge::Edge;
use super::node::Node;
use super::property::PropertyValue;
use super::store::{GraphResult, GraphStore};
use super::types::TypedId;
use crate::config::GraphConfig;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// Cloneable handle to one in-memory graph
///
/// Clones share the same store. Independent graphs are independent
/// handles; nothing is process-global.
#[derive(Debug, Clone)]
pub struct Graph {
    store: Arc<RwLock<GraphStore>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        info!(
            node_capacity = config.initial_node_capacity,
            edge_capacity = config.initial_edge_capacity,
            "initializing graph"
        );
        Self::from_store(GraphStore::with_config(config))
    }

    pub fn from_store(store: GraphStore) -> Self {
        Graph {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Acquire the read lock for a batch of lookups
    ///
    /// A writer that panicked cannot leave the store half-updated, so a
    /// poisoned lock is recovered rather than propagated.
    pub fn read(&self) -> RwLockReadGuard<'_, GraphStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire the write lock for a batch of mutations
    pub fn write(&self) -> RwLockWriteGuard<'_, GraphStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    // === Nodes ===

    pub fn add_node(&self, node: Node) {
        self.write().add_node(node)
    }

    pub fn add_node_from_attributes<K, V>(&self, attrs: impl IntoIterator<Item = (K, V)>) -> TypedId
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.write().add_node_from_attributes(attrs)
    }

    /// Snapshot of the node's current state
    pub fn get_node(&self, id: &TypedId) -> Option<Node> {
        self.read().get_node(id).cloned()
    }

    pub fn has_node(&self, id: &TypedId) -> bool {
        self.read().has_node(id)
    }

    /// Upsert-on-access: snapshot of the node, materialized bare if absent
    pub fn get_or_insert_node(&self, id: &TypedId) -> Node {
        self.write().get_or_insert_node(id).clone()
    }

    pub fn patch_node<K, V>(&self, id: &TypedId, attrs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.write().patch_node(id, attrs)
    }

    pub fn set_node_attribute(
        &self,
        id: &TypedId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        self.write().set_node_attribute(id, key, value)
    }

    pub fn del_node_attribute(
        &self,
        id: &TypedId,
        key: &str,
    ) -> GraphResult<Option<PropertyValue>> {
        self.write().del_node_attribute(id, key)
    }

    /// Visit the node's attributes in insertion order until `visitor`
    /// returns false. Does nothing for an unknown node.
    pub fn range_node<F>(&self, id: &TypedId, visitor: F)
    where
        F: FnMut(&str, &PropertyValue) -> bool,
    {
        if let Some(node) = self.read().get_node(id) {
            node.range(visitor);
        }
    }

    pub fn node_to_json(&self, id: &TypedId) -> GraphResult<Vec<u8>> {
        self.read().node_to_json(id)
    }

    pub fn node_merge_json(&self, id: &TypedId, bytes: &[u8]) -> GraphResult<()> {
        self.write().node_merge_json(id, bytes)
    }

    pub fn del_node(&self, id: &TypedId) -> Option<Node> {
        self.write().del_node(id)
    }

    // === Edges ===

    pub fn add_edge(&self, edge: Edge) -> GraphResult<()> {
        self.write().add_edge(edge)
    }

    pub fn get_edge(&self, id: &TypedId) -> Option<Edge> {
        self.read().get_edge(id).cloned()
    }

    pub fn patch_edge<K, V>(
        &self,
        id: &TypedId,
        attrs: impl IntoIterator<Item = (K, V)>,
    ) -> GraphResult<()>
    where
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.write().patch_edge(id, attrs)
    }

    pub fn del_edge(&self, id: &TypedId) -> GraphResult<Edge> {
        self.write().del_edge(id)
    }

    /// Connect two nodes; the whole connection happens under one write lock
    pub fn connect(
        &self,
        from: &TypedId,
        to: &TypedId,
        relationship: &str,
        mutual: bool,
    ) -> GraphResult<Edge> {
        self.write().connect(from, to, relationship, mutual)
    }

    pub fn edges_from<F>(&self, edge_type: &str, source: &TypedId, visitor: F)
    where
        F: FnMut(&Edge) -> bool,
    {
        self.read().edges_from(edge_type, source, visitor)
    }

    pub fn edges_to<F>(&self, edge_type: &str, target: &TypedId, visitor: F)
    where
        F: FnMut(&Edge) -> bool,
    {
        self.read().edges_to(edge_type, target, visitor)
    }

    pub fn filter_edges_from<F>(&self, edge_type: &str, source: &TypedId, filter: F) -> Vec<Edge>
    where
        F: Fn(&Edge) -> bool,
    {
        self.read().filter_edges_from(edge_type, source, filter)
    }

    pub fn filter_edges_to<F>(&self, edge_type: &str, target: &TypedId, filter: F) -> Vec<Edge>
    where
        F: Fn(&Edge) -> bool,
    {
        self.read().filter_edges_to(edge_type, target, filter)
    }

    /// Lazy iterator over outgoing edges of `edge_type`
    ///
    /// Holds the read lock until dropped; stop early by dropping it.
    pub fn cursor_from(&self, edge_type: &str, source: &TypedId) -> EdgeCursor<'_> {
        EdgeCursor::new(self.read(), Direction::Outgoing, edge_type, source)
    }

    /// Lazy iterator over incoming edges of `edge_type`
    pub fn cursor_to(&self, edge_type: &str, target: &TypedId) -> EdgeCursor<'_> {
        EdgeCursor::new(self.read(), Direction::Incoming, edge_type, target)
    }

    // === Statistics ===

    pub fn node_count(&self) -> usize {
        self.read().node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.read().edge_count()
    }

    pub fn clear(&self) {
        self.write().clear()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellable walk over one adjacency list
///
/// Yields owned edges in insertion order. Each new cursor starts from the
/// beginning; dropping it ends the walk and releases the read lock.
pub struct EdgeCursor<'a> {
    guard: RwLockReadGuard<'a, GraphStore>,
    direction: Direction,
    edge_type: String,
    anchor: TypedId,
    pos: usize,
}

impl<'a> EdgeCursor<'a> {
    fn new(
        guard: RwLockReadGuard<'a, GraphStore>,
        direction: Direction,
        edge_type: &str,
        anchor: &TypedId,
    ) -> Self {
        EdgeCursor {
            guard,
            direction,
            edge_type: edge_type.to_string(),
            anchor: anchor.clone(),
            pos: 0,
        }
    }
}

impl Iterator for EdgeCursor<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        let edge = self
            .guard
            .edge_at(self.direction, &self.edge_type, &self.anchor, self.pos)?
            .clone();
        self.pos += 1;
        Some(edge)
    }
}
