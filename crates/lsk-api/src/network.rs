//! Network identity headers
//!
//! Every request carries a header record telling the peer which logical
//! network the client belongs to. One record is precomputed per network and
//! looked up by the pool's current mode.

use std::collections::BTreeMap;
use std::fmt;

/// Mainnet nethash
pub const MAINNET_NETHASH: &str =
    "ed14889723f24ecc54871d058d98ce91ff2f973192075c0155ba2b7b70ad2511";

/// Testnet nethash
pub const TESTNET_NETHASH: &str =
    "da3ed6a45429278bac2666961289ca17ad86595d33b31037615d4b8e8f158bba";

const CONTENT_TYPE: &str = "application/json";
const CLIENT_OS: &str = "lisk-js-api";
const CLIENT_VERSION: &str = "1.0.0";
const MIN_VERSION: &str = ">=0.5.0";

/// Logical network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Main network
    Mainnet,
    /// Test network
    Testnet,
}

impl Network {
    /// Network for a testnet flag
    pub fn from_testnet(testnet: bool) -> Self {
        if testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    /// Well-known nethash of this network
    pub fn nethash(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_NETHASH,
            Network::Testnet => TESTNET_NETHASH,
        }
    }

    /// Network whose well-known nethash is exactly `nethash`
    pub fn from_nethash(nethash: &str) -> Option<Self> {
        if nethash == TESTNET_NETHASH {
            Some(Network::Testnet)
        } else if nethash == MAINNET_NETHASH {
            Some(Network::Mainnet)
        } else {
            None
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Header record identifying the client to a peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Network fingerprint
    pub nethash: String,
    /// Broadhash (same as the nethash for a client)
    pub broadhash: String,
    /// OS tag
    pub os: String,
    /// Client version
    pub version: String,
    /// Minimum compatible peer version
    pub min_version: String,
    /// Port advertised to the peer
    pub port: Option<u16>,
}

impl Fingerprint {
    fn new(nethash: &str, port: Option<u16>) -> Self {
        Self {
            nethash: nethash.to_string(),
            broadhash: nethash.to_string(),
            os: CLIENT_OS.to_string(),
            version: CLIENT_VERSION.to_string(),
            min_version: MIN_VERSION.to_string(),
            port,
        }
    }

    /// Render as HTTP headers
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE.to_string());
        headers.insert("nethash".to_string(), self.nethash.clone());
        headers.insert("broadhash".to_string(), self.broadhash.clone());
        headers.insert("os".to_string(), self.os.clone());
        headers.insert("version".to_string(), self.version.clone());
        headers.insert("minVersion".to_string(), self.min_version.clone());
        if let Some(port) = self.port {
            headers.insert("port".to_string(), port.to_string());
        }
        headers
    }
}

/// Precomputed fingerprints for both networks
#[derive(Debug, Clone)]
pub struct NetworkIdentity {
    mainnet: Fingerprint,
    testnet: Fingerprint,
}

impl NetworkIdentity {
    /// Create identity records for the given advertised port
    pub fn new(port: Option<u16>) -> Self {
        Self {
            mainnet: Fingerprint::new(MAINNET_NETHASH, port),
            testnet: Fingerprint::new(TESTNET_NETHASH, port),
        }
    }

    /// Replace the nethash of both records
    ///
    /// Only the headers change; redial decisions still compare against the
    /// well-known nethashes.
    pub fn with_nethash(mut self, nethash: &str) -> Self {
        for record in [&mut self.mainnet, &mut self.testnet] {
            record.nethash = nethash.to_string();
            record.broadhash = nethash.to_string();
        }
        self
    }

    /// Fingerprint record for a network
    pub fn fingerprint_for(&self, network: Network) -> &Fingerprint {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }

    /// Headers for a network
    pub fn headers_for(&self, network: Network) -> BTreeMap<String, String> {
        self.fingerprint_for(network).headers()
    }
}
