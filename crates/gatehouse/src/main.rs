// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gatehouse - email-driven guest registration for a visitor access portal.
//!
//! This is the binary entry point for the Gatehouse service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod process;
mod serve;
mod user;

/// Gatehouse - email-driven guest registration service.
#[derive(Parser, Debug)]
#[command(name = "gatehouse", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Gatehouse service (webhook gateway and mailbox poller).
    Serve,
    /// Process a single email from a file or stdin and print the result.
    Process(process::ProcessArgs),
    /// Manage directory profiles.
    User {
        #[command(subcommand)]
        command: user::UserCommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match gatehouse_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            gatehouse_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.portal.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Some(Commands::Serve) => serve::run(config).await,
        Some(Commands::Process(args)) => process::run(config, args).await,
        Some(Commands::User { command }) => user::run(config, command).await,
        None => {
            println!("gatehouse: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("gatehouse: {e}");
        std::process::exit(1);
    }
}
