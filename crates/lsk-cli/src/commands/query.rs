//! Query commands

use clap::Subcommand;

use crate::{commands, config::CliConfig, CliError};

/// Query subcommands
#[derive(Debug, Subcommand)]
pub enum QueryCommand {
    /// Query an account
    Account {
        /// Account address
        address: String,
    },
    /// Query an account balance
    Balance {
        /// Account address
        address: String,
    },
    /// Query the block at a height
    Block {
        /// Block height
        height: u64,
    },
    /// List peers known to the current peer
    Peers {
        /// Maximum number of peers
        #[arg(long)]
        limit: Option<u32>,
    },
}

impl QueryCommand {
    pub async fn execute(self, config: &CliConfig, json: bool) -> Result<(), CliError> {
        let client = commands::connect(config)?;
        let outcome = match self {
            QueryCommand::Account { address } => client.get_account(&address).await?,
            QueryCommand::Balance { address } => client.get_balance(&address).await?,
            QueryCommand::Block { height } => client.get_block(height).await?,
            QueryCommand::Peers { limit } => client.get_peers(limit).await?,
        };
        commands::report(outcome, json)
    }
}
