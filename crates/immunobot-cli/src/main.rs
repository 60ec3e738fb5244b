//! Immunobot CLI - run immune-response swarms on the host.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "immunobot")]
#[command(author, version, long_about = None)]
#[command(about = "Immunobot - immune-response gossip for robot swarms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default immunobot.toml with a demo layout
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run the configured swarm
    Run {
        /// Number of ticks to run
        #[arg(short, long, default_value = "300")]
        ticks: u64,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the roles and their capability groups
    Roles,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run { ticks, json } => commands::run::run(ticks, json, cli.verbose),
        Commands::Roles => commands::roles::run(),
    }
}
