//! Peer pool bookkeeping

use crate::error::SelectionError;
use crate::network::Network;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Default mainnet HTTP port
pub const MAINNET_PORT: u16 = 8000;
/// Default testnet HTTP port
pub const TESTNET_PORT: u16 = 7000;
/// Default HTTPS port
pub const SSL_PORT: u16 = 443;

/// Configured peer lists
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeerLists {
    /// Mainnet peers reached over plain HTTP
    pub mainnet: Vec<String>,
    /// Mainnet peers reached over HTTPS
    pub ssl: Vec<String>,
    /// Testnet peers (SSL or not)
    pub testnet: Vec<String>,
}

/// Peer pool owned by a client instance
///
/// Holds the configured peers, the peer currently in use and the set of
/// banned peers. Bans are never lifted.
#[derive(Debug, Clone)]
pub struct PeerPool {
    current_peer: String,
    port: Option<u16>,
    use_ssl: bool,
    use_testnet: bool,
    random_peer: bool,
    peers: PeerLists,
    banned: HashSet<String>,
}

impl PeerPool {
    /// Create a pool over the given lists
    ///
    /// The current peer starts empty; set it with [`PeerPool::set_current_peer`]
    /// or [`PeerPool::with_current_peer`].
    pub fn new(peers: PeerLists) -> Self {
        Self {
            current_peer: String::new(),
            port: None,
            use_ssl: false,
            use_testnet: false,
            random_peer: false,
            peers,
            banned: HashSet::new(),
        }
    }

    /// Set the current peer
    pub fn with_current_peer(mut self, peer: impl Into<String>) -> Self {
        self.current_peer = peer.into();
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable SSL
    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.use_ssl = ssl;
        self
    }

    /// Select testnet or mainnet
    pub fn with_testnet(mut self, testnet: bool) -> Self {
        self.use_testnet = testnet;
        self
    }

    /// Enable or disable random-peer mode
    pub fn with_random_peer(mut self, random_peer: bool) -> Self {
        self.random_peer = random_peer;
        self
    }

    /// Start with some peers already banned
    pub fn with_banned<I, S>(mut self, banned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banned.extend(banned.into_iter().map(Into::into));
        self
    }

    /// Peer list for the current (ssl, testnet) combination
    ///
    /// SSL only distinguishes lists on mainnet: testnet always resolves to
    /// the testnet list.
    pub fn active_peer_list(&self) -> &[String] {
        if self.use_testnet {
            &self.peers.testnet
        } else if self.use_ssl {
            &self.peers.ssl
        } else {
            &self.peers.mainnet
        }
    }

    /// Active peers that are not banned, in configured order
    pub fn unbanned_peers(&self) -> Vec<&str> {
        self.active_peer_list()
            .iter()
            .filter(|peer| !self.banned.contains(peer.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Whether at least one active peer is not banned
    pub fn has_unbanned_peers(&self) -> bool {
        self.active_peer_list()
            .iter()
            .any(|peer| !self.banned.contains(peer.as_str()))
    }

    /// Draw uniformly from the unbanned active peers
    pub fn pick_random_unbanned<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<String, SelectionError> {
        self.unbanned_peers()
            .choose(rng)
            .map(|peer| peer.to_string())
            .ok_or(SelectionError::ExhaustedPeers)
    }

    /// Ban the current peer
    ///
    /// Returns `false` if it was already banned.
    pub fn ban_current_node(&mut self) -> bool {
        self.banned.insert(self.current_peer.clone())
    }

    /// Whether a peer is banned
    pub fn is_banned(&self, peer: &str) -> bool {
        self.banned.contains(peer)
    }

    /// Banned peers
    pub fn banned_peers(&self) -> &HashSet<String> {
        &self.banned
    }

    /// Current peer
    pub fn current_peer(&self) -> &str {
        &self.current_peer
    }

    /// Replace the current peer
    pub fn set_current_peer(&mut self, peer: impl Into<String>) {
        self.current_peer = peer.into();
    }

    /// Configured port
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Whether requests use HTTPS
    pub fn use_ssl(&self) -> bool {
        self.use_ssl
    }

    /// Switch HTTPS on or off
    pub fn set_ssl(&mut self, ssl: bool) {
        self.use_ssl = ssl;
    }

    /// Whether the client targets testnet
    pub fn use_testnet(&self) -> bool {
        self.use_testnet
    }

    /// Switch between testnet and mainnet
    pub fn set_testnet(&mut self, testnet: bool) {
        self.use_testnet = testnet;
    }

    /// Network currently targeted
    pub fn network(&self) -> Network {
        Network::from_testnet(self.use_testnet)
    }

    /// Whether the client may pick and rotate peers itself
    pub fn random_peer(&self) -> bool {
        self.random_peer
    }

    /// Configured peer lists
    pub fn peer_lists(&self) -> &PeerLists {
        &self.peers
    }

    /// URL scheme
    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }

    /// `scheme://peer[:port]` for the current peer
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme(), self.current_peer, port),
            None => format!("{}://{}", self.scheme(), self.current_peer),
        }
    }
}
