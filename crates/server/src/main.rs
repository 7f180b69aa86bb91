// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! leadbook: HTTP server for the leadbook lead tracker.
//!
//! Serves the public contact form endpoint and the authenticated dashboard
//! API over a single JSON lead document.

mod config;
mod error;
mod server;
mod state;

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{Config, DEFAULT_CONFIG_FILE};

/// leadbook: Lead tracking server
#[derive(Parser, Debug)]
#[command(name = "leadbook")]
#[command(about = "Lead tracking server with role-based access", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Address to bind the server to (overrides the config)
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Path of the lead document (overrides the config)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the digest to store as a user's password_sha256
    HashPassword {
        /// Plaintext password
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Command::Serve { config, bind, data, verbose } => serve(config, bind, data, verbose).await,
        Command::HashPassword { password } => {
            println!("{}", lb_core::hash_password(&password));
            Ok(())
        }
    }
}

async fn serve(
    config_path: PathBuf,
    bind: Option<SocketAddr>,
    data: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load(&config_path)?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(data) = data {
        config.storage.path = data;
    }

    info!("Starting leadbook server");
    info!("  Config: {}", config_path.display());
    info!("  Bind address: {}", config.server.bind);

    let state = state::ServerState::from_config(&config)?;
    server::run(config.server.bind, state).await?;

    Ok(())
}
