//! Error types

use thiserror::Error;

/// Node selection failures.
///
/// These are raised before any request is sent and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Every peer of the active list is banned
    #[error("Cannot get random peer: all relevant peers have been banned.")]
    ExhaustedPeers,

    /// The explicitly provided node is banned and random-peer mode is off
    #[error("Cannot select node: provided node has been banned and randomPeer is not set to true.")]
    BannedNode(String),

    /// No node was provided and random-peer mode is off
    #[error("Cannot select node: no node provided and randomPeer is not set to true.")]
    NoNodeSpecified,
}

/// Failures reported by a [`Transport`](crate::Transport)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// HTTP client error (connect, TLS, protocol)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success status with a body that is not JSON
    #[error("HTTP status {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Peer could not be reached
    #[error("Peer unavailable: {0}")]
    Unavailable(String),
}

/// Public API error
#[derive(Debug, Error)]
pub enum ApiError {
    /// Node selection failed
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request rejected before dispatch
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for client operations
pub type ApiResult<T> = Result<T, ApiError>;
