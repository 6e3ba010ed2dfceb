//! `peer` command-line client.
//!
//! # Architecture Overview
//!
//! ```text
//!   peer channel join -b genesis.block
//!        │
//!        ▼
//!   ┌──────────┐   ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//!   │  config  │──▶│ channel/join │──▶│ protos/utils  │──▶│ peer/endorser│──▶ Endorser
//!   │ + logging│   │ JoinChain    │   │ sign proposal │   │ ProcessProp. │    (remote)
//!   └──────────┘   └──────────────┘   └───────────────┘   └──────┬───────┘
//!                                                                 │
//!                                     validate_response ◀─────────┘
//! ```
//!
//! Exit status is 0 on success and 1 on any failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use peer_cli::channel::JoinConfig;
use peer_cli::commands::{self, CommandError};
use peer_cli::config::load_config;
use peer_cli::observability::logging;

#[derive(Parser)]
#[command(name = "peer")]
#[command(about = "Administrative client for a peer node", long_about = None)]
struct Cli {
    /// Path to a core.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Logging filter, overrides RUST_LOG and logging.level
    #[arg(long = "logging-level", global = true)]
    logging_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Operate a channel
    Channel {
        #[command(subcommand)]
        command: ChannelCommands,
    },
    /// Operate the peer node
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },
    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum ChannelCommands {
    /// Joins the peer to a channel.
    Join {
        /// Path to file containing genesis block
        #[arg(short = 'b', long = "blockpath")]
        blockpath: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum NodeCommands {
    /// Returns the status of the running node
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    if let Commands::Version = cli.command {
        return commands::version(&mut std::io::stdout());
    }

    let config = load_config(cli.config.as_deref())?;
    logging::init(cli.logging_level.as_deref(), &config.logging.level);

    tracing::debug!(
        peer_address = %config.peer.address,
        tls = config.peer.tls.enabled,
        "Configuration loaded"
    );

    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::Channel {
            command: ChannelCommands::Join { blockpath },
        } => {
            let join = JoinConfig {
                genesis_block_path: blockpath,
            };
            commands::channel_join(&config, join, &mut stdout).await
        }
        Commands::Node {
            command: NodeCommands::Status,
        } => commands::node_status(&config, &mut stdout).await,
        Commands::Version => commands::version(&mut stdout),
    }
}
