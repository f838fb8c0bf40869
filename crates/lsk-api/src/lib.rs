//! # lsk-api
//!
//! Request dispatch over a set of interchangeable Lisk peers.
//!
//! ## Features
//!
//! - **PeerPool**: configured peer lists, current peer, permanent bans
//! - **NodeSelector**: explicit node or uniform random pick among unbanned peers
//! - **NetworkIdentity**: mainnet/testnet nethash headers
//! - **RedialPolicy**: whether a failed request may move to another peer
//! - **Dispatcher**: clock-skew retry and peer redial around every request
//! - **LiskClient**: facade with pool mutators and endpoint helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lsk_api::{ClientConfig, LiskClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Random-peer mode over the built-in mainnet peers
//!     let client = LiskClient::new(ClientConfig::default())?;
//!
//!     let outcome = client.get_block(1).await?;
//!     println!("{}", outcome.to_json());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Custom strategies
//!
//! ```rust
//! use std::sync::Arc;
//! use parking_lot::RwLock;
//! use lsk_api::{
//!     Dispatcher, LiskClient, MockTransport, NethashRedialPolicy, NetworkIdentity,
//!     PeerLists, PeerPool, RandomNodeSelector,
//! };
//!
//! let pool = PeerPool::new(PeerLists {
//!     mainnet: vec!["localhost".into(), "external".into()],
//!     ..Default::default()
//! })
//! .with_random_peer(true);
//!
//! let dispatcher = Dispatcher::new(
//!     Arc::new(RwLock::new(pool)),
//!     NetworkIdentity::new(Some(8000)),
//!     MockTransport::new(),
//! )
//! .with_selector(RandomNodeSelector)
//! .with_redial_policy(NethashRedialPolicy);
//!
//! let client = LiskClient::from_dispatcher(dispatcher, None).unwrap();
//! assert!(!client.current_peer().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
pub mod config;
pub mod dispatcher;
mod error;
pub mod network;
pub mod outcome;
pub mod peers;
pub mod redial;
pub mod request;
pub mod selector;
mod transport;

// Re-export main types
pub use client::LiskClient;
pub use config::{ClientConfig, PeerListConfig};
pub use dispatcher::{is_timestamp_in_future, Dispatcher, MAX_TIME_OFFSET, TIME_OFFSET_STEP};
pub use error::{ApiError, ApiResult, SelectionError, TransportError};
pub use network::{Network, NetworkIdentity, MAINNET_NETHASH, TESTNET_NETHASH};
pub use outcome::{Failure, RequestOutcome, NO_PEER_MESSAGE};
pub use peers::{PeerLists, PeerPool};
pub use redial::{NethashRedialPolicy, RedialPolicy};
pub use request::{Params, RequestBuilder, RequestDescriptor, Verb};
pub use selector::{NodeSelector, RandomNodeSelector};
pub use transport::MockTransport;

/// Re-export Transport trait for custom implementations
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::HttpTransport;
