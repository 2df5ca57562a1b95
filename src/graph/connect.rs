//! Connecting nodes under a named relationship
//!
//! A connection is one directed edge, or two when mutual (a friendship is
//! mutual, a follow is not). Mutual connections are all-or-nothing: if the
//! reverse edge cannot be indexed the forward edge is withdrawn again.

use super::edge::Edge;
use super::store::{GraphError, GraphResult, GraphStore};
use super::types::TypedId;
use tracing::{debug, warn};

impl GraphStore {
    /// Connect `from` to `to` with a `relationship` edge
    ///
    /// `to` must already exist. `from` is materialized if it does not. When
    /// `mutual` is set a second edge `to -> from` with its own generated id
    /// is added as well. Returns the forward edge.
    pub fn connect(
        &mut self,
        from: &TypedId,
        to: &TypedId,
        relationship: &str,
        mutual: bool,
    ) -> GraphResult<Edge> {
        let forward_id = TypedId::generate(relationship);
        let reverse_id = mutual.then(|| TypedId::generate(relationship));
        self.connect_with_ids(from, to, forward_id, reverse_id)
    }

    /// Connect with caller-chosen edge ids; `reverse_id` makes it mutual
    fn connect_with_ids(
        &mut self,
        from: &TypedId,
        to: &TypedId,
        forward_id: TypedId,
        reverse_id: Option<TypedId>,
    ) -> GraphResult<Edge> {
        if !self.has_node(to) {
            return Err(GraphError::NodeNotFound(to.clone()));
        }

        let materialized = !self.has_node(from);
        self.get_or_insert_node(from);

        let forward = Edge::with_id(forward_id, from.clone(), to.clone());
        if let Err(err) = self.add_edge(forward.clone()) {
            self.rollback_connect(None, from, materialized);
            return Err(err);
        }

        let mutual = reverse_id.is_some();
        if let Some(reverse_id) = reverse_id {
            let reverse = Edge::with_id(reverse_id, to.clone(), from.clone());
            if let Err(err) = self.add_edge(reverse) {
                warn!(
                    edge = %forward.id(),
                    error = %err,
                    "reverse edge failed, withdrawing mutual connection"
                );
                self.rollback_connect(Some(forward.id()), from, materialized);
                return Err(err);
            }
        }

        debug!(from = %from, to = %to, relationship = forward.relationship(), mutual, "connect");
        Ok(forward)
    }

    fn rollback_connect(&mut self, forward: Option<&TypedId>, from: &TypedId, materialized: bool) {
        if let Some(id) = forward {
            let withdrawn = self.del_edge(id);
            debug_assert!(withdrawn.is_ok(), "forward edge {} missing on rollback", id);
        }
        if materialized {
            self.del_node(from);
        }
    }
}
