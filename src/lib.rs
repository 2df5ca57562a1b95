//! Dagger
//!
//! An in-memory, typed property graph. Nodes and edges are identified by a
//! `(type, id)` pair and carry an arbitrary string-keyed attribute bag.
//! Nodes are connected through directed, optionally mutual, typed edges and
//! walked by relationship type in either direction.
//!
//! # Guarantees
//!
//! - Every stored edge references two existing nodes; deleting a node
//!   deletes every edge incident to it.
//! - Adding a node whose identity already exists merges attributes instead
//!   of duplicating the node.
//! - A mutual connection stores both directions or neither.
//! - [`Graph`] serializes writers against each other and against walks;
//!   readers run concurrently.
//!
//! ## Example Usage
//!
//! ```rust
//! use dagger::{Graph, Node, TypedId};
//!
//! let graph = Graph::new();
//!
//! let alice = TypedId::new("user", "1");
//! let bob = TypedId::new("user", "2");
//! graph.add_node(Node::with_attributes(alice.clone(), vec![("name", "Alice")]));
//! graph.add_node(Node::with_attributes(bob.clone(), vec![("name", "Bob")]));
//!
//! graph.connect(&alice, &bob, "friend", true).unwrap();
//!
//! let mut friends = Vec::new();
//! graph.edges_from("friend", &bob, |edge| {
//!     friends.push(edge.to().clone());
//!     true
//! });
//! assert_eq!(friends, vec![alice.clone()]);
//!
//! graph.del_node(&alice);
//! assert_eq!(graph.cursor_from("friend", &bob).count(), 0);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, GraphConfig};
pub use graph::{
    Attributes, Direction, Edge, EdgeCursor, Graph, GraphError, GraphResult, GraphStore, Node,
    PropertyValue, TypedId, ID_KEY, TYPE_KEY,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
