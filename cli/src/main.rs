//! BPDU Finder CLI - Find switch ports that receive BPDUs
//!
//! A command-line tool for collecting per-port received-BPDU counters
//! from switches over SSH, or from saved command output.

mod commands;
mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bpdu-finder")]
#[command(author, version, about = "Find ports which received BPDU")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect BPDU counters from one or more switches
    Scan {
        /// Target device IP addresses or hostnames
        #[arg(required = true)]
        hosts: Vec<String>,

        /// SSH username (prompted if neither given nor configured)
        #[arg(short, long)]
        username: Option<String>,

        /// SSH port
        #[arg(short, long)]
        port: Option<u16>,

        /// Connect timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Parse saved `show spanning-tree detail` output
    Parse {
        /// File with command output (reads stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Scan {
            hosts,
            username,
            port,
            timeout,
        } => {
            let opts = commands::scan::ScanOptions {
                hosts,
                username,
                port,
                timeout,
            };
            commands::scan::run(opts, cli.json).await?;
        }
        Commands::Parse { file } => {
            commands::parse::run(file, cli.json).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(cli.json).await?,
            ConfigAction::Init { force } => commands::config::init(force).await?,
        },
    }

    Ok(())
}
