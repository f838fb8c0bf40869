//! CLI error types

use serde_json::{json, Value};
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client error (selection, configuration, request validation)
    #[error("{0}")]
    Api(#[from] lsk_api::ApiError),

    /// Dispatch gave up on every peer
    #[error("{message}")]
    Request {
        /// Outcome message
        message: String,
        /// Full failed outcome
        outcome: Value,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    /// JSON rendering for `--json` mode
    pub fn to_json(&self) -> Value {
        match self {
            CliError::Request { outcome, .. } => outcome.clone(),
            other => json!({
                "error": other.to_string(),
                "success": false,
            }),
        }
    }
}
