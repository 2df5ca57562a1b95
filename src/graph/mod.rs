//! Core typed property graph
//!
//! This module implements the graph data model with:
//! - Nodes and edges identified by a `(type, id)` pair
//! - String-keyed attribute bags with reserved `_type` / `_id` keys
//! - Directed edges indexed by relationship in both directions
//! - Mutual (two-way) connections
//! - A shared handle with reader/writer locking

pub mod adjacency;
pub mod connect;
pub mod edge;
pub mod handle;
pub mod node;
pub mod property;
pub mod registry;
pub mod store;
pub mod types;

// Re-export main types
pub use adjacency::{Direction, EdgeIndex};
pub use edge::Edge;
pub use handle::{EdgeCursor, Graph};
pub use node::Node;
pub use property::{Attributes, PropertyValue};
pub use registry::NodeRegistry;
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{TypedId, ID_KEY, TYPE_KEY};
