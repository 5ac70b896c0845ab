// SPDX-FileCopyrightText: 2026 Probekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probekit - construct and run registered data-collection programs by name.
//!
//! This is the binary entry point for Probekit.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod programs;
mod run;
mod shutdown;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use probekit_config::{ConfigError, ProbekitConfig};
use tracing::error;

/// Probekit - construct and run registered data-collection programs by name.
#[derive(Parser, Debug)]
#[command(name = "probekit", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List every registered program.
    List,
    /// Print a program's description.
    Describe {
        /// Registered program name.
        name: String,
    },
    /// Load a program and watch its events until interrupted.
    Run {
        /// Program to run instead of `program.name` from config.
        #[arg(long, short)]
        program: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            probekit_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging.level);

    let result = match cli.command {
        Commands::List => {
            programs::list_programs();
            Ok(())
        }
        Commands::Describe { name } => {
            programs::describe_program(&name).map(|description| println!("{description}"))
        }
        Commands::Run { program } => run::run_program(&config, program.as_deref()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("probekit: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<ProbekitConfig, Vec<ConfigError>> {
    match path {
        Some(path) => probekit_config::load_and_validate_path(path),
        None => probekit_config::load_and_validate(),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "probekit={level},probekit_core={level},probekit_programs={level},probekit_registry={level},warn",
            level = log_level.to_ascii_lowercase()
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
