//! Routeguard CLI
//!
//! Offline tooling around a route table: evaluate a path for a given session, list the
//! configured routes, compare version strings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{check, common, compare, routes};

#[derive(Parser)]
#[command(name = "routeguard")]
#[command(about = "Routeguard - route access policy checks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate access to a path and print the decision as JSON
    Check {
        /// Route table (TOML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path to evaluate, e.g. /account/billing
        #[arg(short, long)]
        path: String,

        /// Session as JSON, e.g. {"status":"authenticated","user":{"id":"u1","roles":["admin"]}}
        #[arg(short, long)]
        session: Option<String>,

        /// Running application version; the version lookup fails when omitted
        #[arg(long)]
        app_version: Option<String>,

        /// Feature reported as disabled (repeatable)
        #[arg(long = "disabled")]
        disabled: Vec<String>,
    },

    /// List the route table
    Routes {
        /// Route table (TOML)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Compare two version strings
    Compare {
        /// Left-hand version
        a: String,
        /// Right-hand version
        b: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            config,
            path,
            session,
            app_version,
            disabled,
        } => {
            let config = common::load_config(config.as_deref())?;
            let session = common::parse_session(session.as_deref())?;
            let report = check::run(&config, &path, &session, app_version, disabled).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Routes { config } => {
            let config = common::load_config(Some(&config))?;
            print!("{}", routes::render(&config));
        }

        Commands::Compare { a, b } => {
            println!("{}", compare::run(&a, &b));
        }
    }

    Ok(())
}
