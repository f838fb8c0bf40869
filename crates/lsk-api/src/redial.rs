//! Redial decision

use tracing::info;

use crate::network::Network;
use crate::peers::PeerPool;

/// Decides whether a failed request may be retried on another peer
pub trait RedialPolicy: Send + Sync {
    /// May flip the pool's testnet flag when the hint names a known network.
    fn may_redial(&self, pool: &mut PeerPool, nethash_hint: Option<&str>) -> bool;
}

/// Default policy
///
/// - random-peer mode off: never.
/// - hint equal to a known nethash: switch the pool to that network, allow.
/// - hint unknown: never.
/// - no hint: allow while an unbanned active peer remains.
#[derive(Debug, Clone, Copy, Default)]
pub struct NethashRedialPolicy;

impl RedialPolicy for NethashRedialPolicy {
    fn may_redial(&self, pool: &mut PeerPool, nethash_hint: Option<&str>) -> bool {
        if !pool.random_peer() {
            return false;
        }

        let Some(nethash) = nethash_hint else {
            return pool.has_unbanned_peers();
        };

        match Network::from_nethash(nethash) {
            Some(network) => {
                let testnet = network == Network::Testnet;
                if pool.use_testnet() != testnet {
                    info!("Nethash hint targets {}, switching peer list", network);
                }
                pool.set_testnet(testnet);
                true
            }
            None => false,
        }
    }
}
