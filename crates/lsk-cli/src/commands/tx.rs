//! Transaction commands

use clap::Subcommand;
use serde_json::Value;
use std::path::PathBuf;

use crate::{commands, config::CliConfig, CliError};

/// Transaction subcommands
#[derive(Debug, Subcommand)]
pub enum TxCommand {
    /// Broadcast a signed transaction
    Broadcast {
        /// Transaction as a JSON object
        #[arg(conflicts_with = "file")]
        transaction: Option<String>,
        /// Read the transaction from a JSON file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl TxCommand {
    pub async fn execute(self, config: &CliConfig, json: bool) -> Result<(), CliError> {
        match self {
            TxCommand::Broadcast { transaction, file } => {
                let transaction = read_transaction(transaction, file)?;
                let client = commands::connect(config)?;
                let outcome = client.broadcast_transaction(transaction).await?;
                commands::report(outcome, json)
            }
        }
    }
}

fn read_transaction(inline: Option<String>, file: Option<PathBuf>) -> Result<Value, CliError> {
    let text = match (inline, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            return Err(CliError::InvalidInput(
                "provide a transaction or --file".to_string(),
            ))
        }
    };

    let transaction: Value = serde_json::from_str(&text)?;
    if !transaction.is_object() {
        return Err(CliError::InvalidInput(
            "transaction must be a JSON object".to_string(),
        ));
    }
    Ok(transaction)
}
