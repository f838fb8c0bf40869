//! # lsk-cli
//!
//! Command-line interface for Lisk node APIs.
//!
//! ## Usage
//!
//! ```bash
//! # Raw requests
//! lsk get blocks/getHeight
//! lsk get transactions limit=5 offset=3
//! lsk post transactions --data '{"secret": "..."}'
//!
//! # Queries
//! lsk query account 12345L
//! lsk query block 1
//! lsk --testnet query peers --limit 10
//!
//! # Transactions
//! lsk tx broadcast --file tx.json
//!
//! # Configuration
//! lsk config --show
//! lsk config --set-node localhost --set-testnet true
//! ```

use clap::{Parser, Subcommand};
use lsk_api::Verb;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::CliConfig;
pub use error::CliError;
pub use output::Output;

/// Lisk CLI
#[derive(Parser, Debug)]
#[command(name = "lsk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: ~/.lsk/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pin requests to this node
    #[arg(long, global = true)]
    node: Option<String>,

    /// Target testnet
    #[arg(long, global = true)]
    testnet: bool,

    /// Use HTTPS
    #[arg(long, global = true)]
    ssl: bool,

    /// Peer port
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Send a GET request
    Get(commands::request::RequestArgs),
    /// Send a POST request
    Post(commands::request::RequestArgs),
    /// Send a PUT request
    Put(commands::request::RequestArgs),
    /// Query accounts, blocks and peers
    #[command(subcommand)]
    Query(commands::query::QueryCommand),
    /// Transaction operations
    #[command(subcommand)]
    Tx(commands::tx::TxCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set the pinned node
        #[arg(long)]
        set_node: Option<String>,
        /// Remove the pinned node (random peer mode)
        #[arg(long, conflicts_with = "set_node")]
        clear_node: bool,
        /// Set testnet mode
        #[arg(long)]
        set_testnet: Option<bool>,
        /// Set the default log level
        #[arg(long)]
        set_log_level: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli).await {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&e.to_json()).unwrap_or_default()
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = CliConfig::resolve_path(cli.config.as_deref())?;
    let file_config = CliConfig::load(&path)?;

    init_tracing(cli.log_level.as_deref().unwrap_or(&file_config.log_level));

    let mut config = file_config.clone();
    if let Some(node) = &cli.node {
        config.client.node = Some(node.clone());
    }
    if cli.testnet {
        config.client.testnet = true;
    }
    if cli.ssl {
        config.client.ssl = true;
    }
    if cli.port.is_some() {
        config.client.port = cli.port;
    }

    match cli.command {
        Commands::Get(args) => args.execute(Verb::Get, &config, cli.json).await,
        Commands::Post(args) => args.execute(Verb::Post, &config, cli.json).await,
        Commands::Put(args) => args.execute(Verb::Put, &config, cli.json).await,
        Commands::Query(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Tx(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Config {
            show,
            set_node,
            clear_node,
            set_testnet,
            set_log_level,
        } => {
            let changes = ConfigChanges {
                set_node,
                clear_node,
                set_testnet,
                set_log_level,
            };
            if changes.is_empty() {
                show_config(&config, &path, show, cli.json)
            } else {
                save_config(file_config, &path, changes, cli.json)
            }
        }
    }
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

struct ConfigChanges {
    set_node: Option<String>,
    clear_node: bool,
    set_testnet: Option<bool>,
    set_log_level: Option<String>,
}

impl ConfigChanges {
    fn is_empty(&self) -> bool {
        self.set_node.is_none()
            && !self.clear_node
            && self.set_testnet.is_none()
            && self.set_log_level.is_none()
    }
}

fn save_config(
    mut config: CliConfig,
    path: &Path,
    changes: ConfigChanges,
    json: bool,
) -> Result<(), CliError> {
    if let Some(node) = changes.set_node {
        config.client.node = Some(node);
    }
    if changes.clear_node {
        config.client.node = None;
    }
    if let Some(testnet) = changes.set_testnet {
        config.client.testnet = testnet;
    }
    if let Some(level) = changes.set_log_level {
        config.log_level = level;
    }

    config.client.validate()?;
    config.save(path)?;
    Output::new(json)
        .field("status", "saved")
        .field("path", &path.display().to_string())
        .message(&format!("Configuration saved to {}", path.display()))
        .print();

    Ok(())
}

fn show_config(config: &CliConfig, path: &Path, show: bool, json: bool) -> Result<(), CliError> {
    if !show {
        Output::new(json)
            .message("Use --show to display config, or --set-node/--set-testnet to modify")
            .print();
        return Ok(());
    }

    Output::new(json)
        .field("path", &path.display().to_string())
        .field_value("config", serde_json::to_value(config)?)
        .field_value("random_peer", config.client.random_peer().into())
        .field_value(
            "port",
            config.client.effective_port().map_or(serde_json::Value::Null, Into::into),
        )
        .message(&format!("# {}\n{}", path.display(), config.to_toml()?))
        .print();

    Ok(())
}
