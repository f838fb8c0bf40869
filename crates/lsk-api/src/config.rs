//! Client configuration

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::peers::{PeerLists, MAINNET_PORT, SSL_PORT, TESTNET_PORT};

/// Peer lists as written in a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerListConfig {
    /// Mainnet peers
    #[serde(default = "default_mainnet_peers")]
    pub mainnet: Vec<String>,
    /// Mainnet SSL peers; the mainnet list when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<Vec<String>>,
    /// Testnet peers
    #[serde(default = "default_testnet_peers")]
    pub testnet: Vec<String>,
}

fn default_mainnet_peers() -> Vec<String> {
    (21..=28).map(|n| format!("hub{}.lisk.io", n)).collect()
}

fn default_testnet_peers() -> Vec<String> {
    vec!["testnet.lisk.io".to_string()]
}

impl Default for PeerListConfig {
    fn default() -> Self {
        Self {
            mainnet: default_mainnet_peers(),
            ssl: None,
            testnet: default_testnet_peers(),
        }
    }
}

impl From<&PeerListConfig> for PeerLists {
    fn from(config: &PeerListConfig) -> Self {
        PeerLists {
            mainnet: config.mainnet.clone(),
            ssl: config.ssl.clone().unwrap_or_else(|| config.mainnet.clone()),
            testnet: config.testnet.clone(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Node to pin to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    /// Peer port; derived from the network when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Leave the port out of peer URLs (peers behind a reverse proxy)
    #[serde(default)]
    pub no_port: bool,
    /// Use HTTPS
    #[serde(default)]
    pub ssl: bool,
    /// Target testnet
    #[serde(default)]
    pub testnet: bool,
    /// Let the client pick and rotate peers; defaults to `node.is_none()`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_peer: Option<bool>,
    /// Peers banned from the start
    #[serde(default)]
    pub banned_peers: Vec<String>,
    /// Custom nethash sent instead of the well-known one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nethash: Option<String>,
    /// Peer lists
    #[serde(default)]
    pub peers: PeerListConfig,
}

impl ClientConfig {
    /// Config pinned to a single node
    pub fn with_node(node: impl Into<String>) -> Self {
        Self {
            node: Some(node.into()),
            ..Default::default()
        }
    }

    /// Config for random-peer mode over the given mainnet peers
    pub fn with_peers<I, S>(peers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mainnet: Vec<String> = peers.into_iter().map(Into::into).collect();
        Self {
            peers: PeerListConfig {
                testnet: mainnet.clone(),
                ssl: Some(mainnet.clone()),
                mainnet,
            },
            ..Default::default()
        }
    }

    /// Effective random-peer mode
    pub fn random_peer(&self) -> bool {
        self.random_peer.unwrap_or(self.node.is_none())
    }

    /// Effective port; `None` when URLs carry no port
    pub fn effective_port(&self) -> Option<u16> {
        if self.no_port {
            return None;
        }
        Some(self.port.unwrap_or(if self.testnet {
            TESTNET_PORT
        } else if self.ssl {
            SSL_PORT
        } else {
            MAINNET_PORT
        }))
    }

    /// Reject inconsistent settings
    pub fn validate(&self) -> ApiResult<()> {
        if self.port == Some(0) {
            return Err(ApiError::Config("port must not be 0".to_string()));
        }
        if matches!(self.node.as_deref(), Some(node) if node.trim().is_empty()) {
            return Err(ApiError::Config("node must not be empty".to_string()));
        }
        let lists = PeerLists::from(&self.peers);
        let active = if self.testnet {
            &lists.testnet
        } else if self.ssl {
            &lists.ssl
        } else {
            &lists.mainnet
        };
        if self.random_peer() && active.is_empty() {
            return Err(ApiError::Config(
                "random peer mode needs at least one configured peer".to_string(),
            ));
        }
        Ok(())
    }
}
