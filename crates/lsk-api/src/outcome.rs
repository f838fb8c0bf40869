//! Dispatch outcomes

use serde_json::{json, Value};

use crate::error::TransportError;

/// Message of the terminal outcome when no peer could serve a request
pub const NO_PEER_MESSAGE: &str = "Could not create an HTTP request to any known peers.";

/// Why the last attempt failed
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The transport could not complete the request
    Transport(TransportError),
    /// The peer answered with `success: false`
    Rejected(Value),
}

impl Failure {
    /// JSON rendering: the peer's payload, or the transport error message
    pub fn to_json(&self) -> Value {
        match self {
            Failure::Transport(err) => Value::String(err.to_string()),
            Failure::Rejected(value) => value.clone(),
        }
    }
}

/// Terminal result of one dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Peer payload, returned unchanged
    Success(Value),
    /// Every recovery path was exhausted
    Failed {
        /// Error of the last attempt
        error: Failure,
        /// Human-readable summary
        message: String,
    },
}

impl RequestOutcome {
    /// Terminal failure after no peer could serve the request
    pub fn unreachable(error: Failure) -> Self {
        RequestOutcome::Failed {
            error,
            message: NO_PEER_MESSAGE.to_string(),
        }
    }

    /// Whether the request succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }

    /// Peer payload on success
    pub fn payload(&self) -> Option<&Value> {
        match self {
            RequestOutcome::Success(value) => Some(value),
            RequestOutcome::Failed { .. } => None,
        }
    }

    /// Convert into a `Result`
    pub fn into_result(self) -> Result<Value, Failure> {
        match self {
            RequestOutcome::Success(value) => Ok(value),
            RequestOutcome::Failed { error, .. } => Err(error),
        }
    }

    /// JSON rendering: `{success: false, error, message}` on failure
    pub fn to_json(&self) -> Value {
        match self {
            RequestOutcome::Success(value) => value.clone(),
            RequestOutcome::Failed { error, message } => json!({
                "success": false,
                "error": error.to_json(),
                "message": message,
            }),
        }
    }
}

/// Whether a peer payload reports success
///
/// Only an explicit `success: false` counts as a rejection.
pub fn reports_success(value: &Value) -> bool {
    value.get("success") != Some(&Value::Bool(false))
}
