//! Adjacency index over typed edges
//!
//! Edge records are keyed by their own `TypedId`. Two views point into them:
//! - outgoing: source node -> relationship -> edge ids
//! - incoming: target node -> relationship -> edge ids
//!
//! Both views keep insertion order and are always updated together, so a
//! forward walk and a reverse walk never disagree.

use super::edge::Edge;
use super::store::{GraphError, GraphResult};
use super::types::TypedId;
use indexmap::IndexSet;
use rustc_hash::FxHashMap;

type AdjacencyMap = FxHashMap<TypedId, FxHashMap<String, IndexSet<TypedId>>>;

/// Which side of an edge a walk is anchored on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Edges whose `from` is the anchor
    Outgoing,
    /// Edges whose `to` is the anchor
    Incoming,
}

#[derive(Debug, Default)]
pub struct EdgeIndex {
    edges: FxHashMap<TypedId, Edge>,
    outgoing: AdjacencyMap,
    incoming: AdjacencyMap,
}

impl EdgeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        EdgeIndex {
            edges: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            outgoing: AdjacencyMap::default(),
            incoming: AdjacencyMap::default(),
        }
    }

    /// Append `edge` to both views
    ///
    /// Endpoint existence is the caller's concern; this only rejects an edge
    /// whose identity is already indexed.
    pub fn insert(&mut self, edge: Edge) -> GraphResult<()> {
        if self.edges.contains_key(edge.id()) {
            return Err(GraphError::EdgeCreationFailure(format!(
                "edge {} already exists",
                edge.id()
            )));
        }

        let relationship = edge.relationship().to_string();
        self.outgoing
            .entry(edge.from().clone())
            .or_default()
            .entry(relationship.clone())
            .or_default()
            .insert(edge.id().clone());
        self.incoming
            .entry(edge.to().clone())
            .or_default()
            .entry(relationship)
            .or_default()
            .insert(edge.id().clone());

        self.edges.insert(edge.id().clone(), edge);
        Ok(())
    }

    pub fn get(&self, id: &TypedId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn get_mut(&mut self, id: &TypedId) -> Option<&mut Edge> {
        self.edges.get_mut(id)
    }

    pub fn contains(&self, id: &TypedId) -> bool {
        self.edges.contains_key(id)
    }

    fn view(&self, direction: Direction) -> &AdjacencyMap {
        match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        }
    }

    /// Ordered edge ids of `edge_type` anchored on `anchor`
    pub fn ids(
        &self,
        direction: Direction,
        edge_type: &str,
        anchor: &TypedId,
    ) -> Option<&IndexSet<TypedId>> {
        self.view(direction).get(anchor)?.get(edge_type)
    }

    /// The `pos`-th edge of a walk, used by cursors that resume by position
    pub fn edge_at(
        &self,
        direction: Direction,
        edge_type: &str,
        anchor: &TypedId,
        pos: usize,
    ) -> Option<&Edge> {
        let id = self.ids(direction, edge_type, anchor)?.get_index(pos)?;
        self.edges.get(id)
    }

    /// Visit edges of `edge_type` anchored on `anchor` in insertion order,
    /// stopping as soon as `visitor` returns false
    pub fn visit<F>(&self, direction: Direction, edge_type: &str, anchor: &TypedId, mut visitor: F)
    where
        F: FnMut(&Edge) -> bool,
    {
        let Some(ids) = self.ids(direction, edge_type, anchor) else {
            return;
        };
        for id in ids {
            if let Some(edge) = self.edges.get(id) {
                if !visitor(edge) {
                    break;
                }
            }
        }
    }

    pub fn edges_from<F>(&self, edge_type: &str, source: &TypedId, visitor: F)
    where
        F: FnMut(&Edge) -> bool,
    {
        self.visit(Direction::Outgoing, edge_type, source, visitor)
    }

    pub fn edges_to<F>(&self, edge_type: &str, target: &TypedId, visitor: F)
    where
        F: FnMut(&Edge) -> bool,
    {
        self.visit(Direction::Incoming, edge_type, target, visitor)
    }

    /// Number of edges incident to `node`, counting self-loops twice
    pub fn degree(&self, node: &TypedId) -> usize {
        [&self.outgoing, &self.incoming]
            .iter()
            .filter_map(|view| view.get(node))
            .flat_map(|by_type| by_type.values())
            .map(|ids| ids.len())
            .sum()
    }

    /// Remove a single edge from the records and both views
    pub fn remove(&mut self, id: &TypedId) -> Option<Edge> {
        let edge = self.edges.remove(id)?;
        detach(&mut self.outgoing, edge.from(), edge.relationship(), id);
        detach(&mut self.incoming, edge.to(), edge.relationship(), id);
        Some(edge)
    }

    /// Remove every edge where `node` is the source or the target
    ///
    /// Only the node's own adjacency entries are walked; each removed edge is
    /// then detached from the opposite endpoint's list.
    pub fn remove_incident(&mut self, node: &TypedId) -> Vec<Edge> {
        let mut ids = Vec::new();
        for view in [&mut self.outgoing, &mut self.incoming] {
            if let Some(by_type) = view.remove(node) {
                ids.extend(by_type.into_values().flatten());
            }
        }

        // Self-loops show up in both lists; the second remove finds nothing.
        ids.iter().filter_map(|id| self.remove(id)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
    }
}

fn detach(view: &mut AdjacencyMap, anchor: &TypedId, edge_type: &str, id: &TypedId) {
    let Some(by_type) = view.get_mut(anchor) else {
        return;
    };
    if let Some(ids) = by_type.get_mut(edge_type) {
        ids.shift_remove(id);
        if ids.is_empty() {
            by_type.remove(edge_type);
        }
    }
    if by_type.is_empty() {
        view.remove(anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> TypedId {
        TypedId::new("user", id)
    }

    fn targets_from(index: &EdgeIndex, edge_type: &str, source: &TypedId) -> Vec<String> {
        let mut out = Vec::new();
        index.edges_from(edge_type, source, |e| {
            out.push(e.to().id().to_string());
            true
        });
        out
    }

    #[test]
    fn test_forward_and_reverse_views() {
        let mut index = EdgeIndex::new();
        index.insert(Edge::new("friend", user("1"), user("2"))).unwrap();
        index.insert(Edge::new("friend", user("1"), user("3"))).unwrap();
        index.insert(Edge::new("follows", user("2"), user("3"))).unwrap();

        assert_eq!(targets_from(&index, "friend", &user("1")), vec!["2", "3"]);
        assert!(targets_from(&index, "follows", &user("1")).is_empty());

        let mut sources = Vec::new();
        index.edges_to("friend", &user("3"), |e| {
            sources.push(e.from().id().to_string());
            true
        });
        assert_eq!(sources, vec!["1"]);
        assert_eq!(index.degree(&user("3")), 2);
    }

    #[test]
    fn test_visit_stops_early() {
        let mut index = EdgeIndex::new();
        for i in 0..5 {
            index.insert(Edge::new("friend", user("hub"), user(&i.to_string()))).unwrap();
        }

        let mut visited = 0;
        index.edges_from("friend", &user("hub"), |_| {
            visited += 1;
            visited < 3
        });
        assert_eq!(visited, 3);
    }

    #[test]
    fn test_duplicate_edge_id_rejected() {
        let mut index = EdgeIndex::new();
        let edge = Edge::new("friend", user("1"), user("2"));
        index.insert(edge.clone()).unwrap();
        let err = index.insert(edge).unwrap_err();
        assert!(matches!(err, GraphError::EdgeCreationFailure(_)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove_single_edge() {
        let mut index = EdgeIndex::new();
        let edge = Edge::new("friend", user("1"), user("2"));
        let id = edge.id().clone();
        index.insert(edge).unwrap();
        index.insert(Edge::new("friend", user("1"), user("3"))).unwrap();

        assert!(index.remove(&id).is_some());
        assert!(index.remove(&id).is_none());
        assert_eq!(targets_from(&index, "friend", &user("1")), vec!["3"]);
        assert!(index.ids(Direction::Incoming, "friend", &user("2")).is_none());
    }

    #[test]
    fn test_remove_incident() {
        let mut index = EdgeIndex::new();
        index.insert(Edge::new("friend", user("a"), user("b"))).unwrap();
        index.insert(Edge::new("friend", user("b"), user("a"))).unwrap();
        index.insert(Edge::new("follows", user("c"), user("a"))).unwrap();
        index.insert(Edge::new("follows", user("b"), user("c"))).unwrap();
        index.insert(Edge::new("self", user("a"), user("a"))).unwrap();

        let removed = index.remove_incident(&user("a"));
        assert_eq!(removed.len(), 4);
        assert_eq!(index.len(), 1);
        assert!(targets_from(&index, "friend", &user("b")).is_empty());
        assert!(targets_from(&index, "follows", &user("c")).is_empty());
        assert_eq!(targets_from(&index, "follows", &user("b")), vec!["c"]);
        assert_eq!(index.degree(&user("a")), 0);
    }

    #[test]
    fn test_edge_at() {
        let mut index = EdgeIndex::new();
        index.insert(Edge::new("friend", user("1"), user("2"))).unwrap();
        index.insert(Edge::new("friend", user("1"), user("3"))).unwrap();

        let second = index.edge_at(Direction::Outgoing, "friend", &user("1"), 1).unwrap();
        assert_eq!(second.to(), &user("3"));
        assert!(index.edge_at(Direction::Outgoing, "friend", &user("1"), 2).is_none());
    }
}
