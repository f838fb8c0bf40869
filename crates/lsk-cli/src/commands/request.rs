//! Raw API requests

use clap::Args;
use lsk_api::{Params, Verb};
use serde_json::Value;

use crate::{commands, config::CliConfig, CliError};

/// Arguments shared by `get`, `post` and `put`
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Endpoint below `/api/`, e.g. `blocks/getHeight`
    pub endpoint: String,

    /// Parameters as `key=value`; values that parse as JSON keep their type
    pub params: Vec<String>,

    /// Parameters as a JSON object, merged before the `key=value` pairs
    #[arg(long)]
    pub data: Option<String>,
}

impl RequestArgs {
    /// Send the request with `verb`
    pub async fn execute(self, verb: Verb, config: &CliConfig, json: bool) -> Result<(), CliError> {
        let endpoint = self.endpoint.trim_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(CliError::InvalidInput("endpoint must not be empty".to_string()));
        }
        let params = self.into_params()?;

        let client = commands::connect(config)?;
        let outcome = client.dispatch(verb, &endpoint, params).await?;
        commands::report(outcome, json)
    }

    fn into_params(self) -> Result<Params, CliError> {
        let mut params = match self.data {
            Some(data) => match serde_json::from_str(&data)? {
                Value::Object(map) => map,
                _ => {
                    return Err(CliError::InvalidInput(
                        "--data must be a JSON object".to_string(),
                    ))
                }
            },
            None => Params::new(),
        };

        for pair in &self.params {
            let (key, value) = parse_param(pair)?;
            params.insert(key, value);
        }
        Ok(params)
    }
}

/// Split `key=value`
pub fn parse_param(pair: &str) -> Result<(String, Value), CliError> {
    let (key, raw) = pair
        .split_once('=')
        .ok_or_else(|| CliError::InvalidInput(format!("expected key=value, got '{}'", pair)))?;
    if key.is_empty() {
        return Err(CliError::InvalidInput(format!("empty key in '{}'", pair)));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
