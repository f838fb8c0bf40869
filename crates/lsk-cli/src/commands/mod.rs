//! CLI commands

pub mod query;
pub mod request;
pub mod tx;

use lsk_api::{LiskClient, RequestOutcome};

use crate::{config::CliConfig, output::Output, CliError};

/// Build an HTTP client from the effective config
pub fn connect(config: &CliConfig) -> Result<LiskClient, CliError> {
    let client = LiskClient::new(config.client.clone())?;
    tracing::debug!("Using peer {}", client.current_peer());
    Ok(client)
}

/// Print a successful outcome; a failed one becomes [`CliError::Request`]
pub fn report(outcome: RequestOutcome, json: bool) -> Result<(), CliError> {
    match &outcome {
        RequestOutcome::Success(payload) => {
            Output::payload(json, payload).print();
            Ok(())
        }
        RequestOutcome::Failed { error, message } => Err(CliError::Request {
            message: format!("{} ({})", message, error.to_json()),
            outcome: outcome.to_json(),
        }),
    }
}
