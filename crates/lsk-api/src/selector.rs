//! Node selection policy

use crate::error::SelectionError;
use crate::peers::PeerPool;

/// Chooses the peer a request goes to (object-safe)
pub trait NodeSelector: Send + Sync {
    /// Pick a node given the pool state and an optional explicit node
    fn select_node(&self, pool: &PeerPool, explicit: Option<&str>)
        -> Result<String, SelectionError>;
}

/// Default selector
///
/// In random-peer mode the explicit node is ignored and a peer is drawn
/// uniformly from the unbanned active list. Otherwise the explicit node is
/// returned as-is unless banned.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNodeSelector;

impl NodeSelector for RandomNodeSelector {
    fn select_node(
        &self,
        pool: &PeerPool,
        explicit: Option<&str>,
    ) -> Result<String, SelectionError> {
        if pool.random_peer() {
            return pool.pick_random_unbanned(&mut rand::thread_rng());
        }

        match explicit {
            Some(node) if pool.is_banned(node) => Err(SelectionError::BannedNode(node.to_string())),
            Some(node) => Ok(node.to_string()),
            None => Err(SelectionError::NoNodeSpecified),
        }
    }
}
