//! LiskClient - main API client

use parking_lot::RwLock;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{ApiError, ApiResult, SelectionError};
use crate::network::NetworkIdentity;
use crate::outcome::RequestOutcome;
use crate::peers::{PeerLists, PeerPool};
use crate::request::{Params, Verb};
use crate::transport::{MockTransport, Transport};

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Client for a set of interchangeable Lisk peers
pub struct LiskClient {
    dispatcher: Dispatcher,
    configured_node: Option<String>,
}

impl LiskClient {
    /// Create a new client with HTTP transport
    #[cfg(feature = "http")]
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Self::with_transport(config, HttpTransport::new())
    }

    /// Create a client pinned to `localhost` with mock transport (for testing)
    pub fn new_mock() -> ApiResult<Self> {
        Self::with_transport(ClientConfig::with_node("localhost"), MockTransport::new())
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> ApiResult<Self> {
        config.validate()?;

        let port = config.effective_port();
        let pool = PeerPool::new(PeerLists::from(&config.peers))
            .with_port(port)
            .with_ssl(config.ssl)
            .with_testnet(config.testnet)
            .with_random_peer(config.random_peer())
            .with_banned(config.banned_peers.iter().cloned());

        let mut identity = NetworkIdentity::new(port);
        if let Some(nethash) = &config.nethash {
            identity = identity.with_nethash(nethash);
        }

        let dispatcher = Dispatcher::new(Arc::new(RwLock::new(pool)), identity, transport)
            .with_default_nethash(config.nethash.clone());

        Self::from_dispatcher(dispatcher, config.node)
    }

    /// Wrap a preconfigured dispatcher
    ///
    /// The current peer becomes `node` when given, otherwise one is selected.
    pub fn from_dispatcher(dispatcher: Dispatcher, node: Option<String>) -> ApiResult<Self> {
        let client = Self {
            dispatcher,
            configured_node: node,
        };

        match client.configured_node.clone() {
            Some(node) => client.dispatcher.pool().write().set_current_peer(node),
            None => {
                client.set_node(None)?;
            }
        }
        Ok(client)
    }

    // ==================== Dispatch ====================

    /// Send a logical request, recovering from peer failures
    pub async fn dispatch(
        &self,
        verb: Verb,
        endpoint: &str,
        params: Params,
    ) -> ApiResult<RequestOutcome> {
        self.dispatcher.dispatch(verb, endpoint, params).await
    }

    /// GET `endpoint`
    pub async fn get(&self, endpoint: &str, params: Params) -> ApiResult<RequestOutcome> {
        self.dispatch(Verb::Get, endpoint, params).await
    }

    /// POST `endpoint`
    pub async fn post(&self, endpoint: &str, params: Params) -> ApiResult<RequestOutcome> {
        self.dispatch(Verb::Post, endpoint, params).await
    }

    // ==================== Endpoints ====================

    /// Get an account
    pub async fn get_account(&self, address: &str) -> ApiResult<RequestOutcome> {
        self.get("accounts", address_params(address)?).await
    }

    /// Get the balance of an account
    pub async fn get_balance(&self, address: &str) -> ApiResult<RequestOutcome> {
        self.get("accounts/getBalance", address_params(address)?).await
    }

    /// Get the block at `height`
    pub async fn get_block(&self, height: u64) -> ApiResult<RequestOutcome> {
        self.get("blocks", object(json!({ "height": height }))).await
    }

    /// List peers known to the current peer
    pub async fn get_peers(&self, limit: Option<u32>) -> ApiResult<RequestOutcome> {
        let params = match limit {
            Some(limit) => object(json!({ "limit": limit })),
            None => Params::new(),
        };
        self.get("peers", params).await
    }

    /// Broadcast a signed transaction
    pub async fn broadcast_transaction(&self, transaction: Value) -> ApiResult<RequestOutcome> {
        if !transaction.is_object() {
            return Err(ApiError::InvalidRequest(
                "transaction must be a JSON object".to_string(),
            ));
        }
        self.post("transactions", object(json!({ "transaction": transaction })))
            .await
    }

    // ==================== Peer Pool ====================

    /// Pin the current peer, or re-select one when `node` is `None`
    ///
    /// Re-selection honours the configured node outside random-peer mode.
    pub fn set_node(&self, node: Option<&str>) -> ApiResult<String> {
        let peer = match node {
            Some(node) => node.to_string(),
            None => self.dispatcher.select_node(self.configured_node.as_deref())?,
        };
        debug!("Current peer set to {}", peer);
        self.dispatcher.pool().write().set_current_peer(peer.clone());
        Ok(peer)
    }

    /// Switch between testnet and mainnet
    ///
    /// In random-peer mode a change re-selects the current peer from the new
    /// list. Bans are kept.
    pub fn set_testnet(&self, testnet: bool) -> ApiResult<()> {
        let reselect = {
            let mut pool = self.dispatcher.pool().write();
            let changed = pool.use_testnet() != testnet;
            pool.set_testnet(testnet);
            changed && pool.random_peer()
        };
        if reselect {
            self.set_node(None)?;
        }
        Ok(())
    }

    /// Switch HTTPS on or off
    ///
    /// In random-peer mode a change re-selects the current peer. Bans are kept.
    pub fn set_ssl(&self, ssl: bool) -> ApiResult<()> {
        let reselect = {
            let mut pool = self.dispatcher.pool().write();
            let changed = pool.use_ssl() != ssl;
            pool.set_ssl(ssl);
            changed && pool.random_peer()
        };
        if reselect {
            self.set_node(None)?;
        }
        Ok(())
    }

    /// Ban the current peer; `false` if it was already banned
    pub fn ban_node(&self) -> bool {
        self.dispatcher.pool().write().ban_current_node()
    }

    /// Run node selection without changing the pool
    pub fn select_node(&self, explicit: Option<&str>) -> Result<String, SelectionError> {
        self.dispatcher.select_node(explicit)
    }

    /// Current peer
    pub fn current_peer(&self) -> String {
        self.dispatcher.pool().read().current_peer().to_string()
    }

    /// Banned peers, sorted
    pub fn banned_peers(&self) -> Vec<String> {
        let mut banned: Vec<String> = self
            .dispatcher
            .pool()
            .read()
            .banned_peers()
            .iter()
            .cloned()
            .collect();
        banned.sort();
        banned
    }

    /// Whether the client targets testnet
    pub fn is_testnet(&self) -> bool {
        self.dispatcher.pool().read().use_testnet()
    }

    /// Active peer list for the current mode
    pub fn active_peers(&self) -> Vec<String> {
        self.dispatcher.pool().read().active_peer_list().to_vec()
    }

    /// Shared peer pool
    pub fn pool(&self) -> Arc<RwLock<PeerPool>> {
        Arc::clone(self.dispatcher.pool())
    }
}

fn address_params(address: &str) -> ApiResult<Params> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ApiError::InvalidRequest("address must not be empty".to_string()));
    }
    Ok(object(json!({ "address": address })))
}

fn object(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}
