//! Yeka CLI Entry Point
//!
//! Command-line client for the Yeka submission portal.
//!
//! Usage:
//!   yeka report       - Submit a corruption report
//!   yeka complaint    - Submit a service complaint
//!   yeka types        - List corruption types for the report form
//!   yeka status       - Look up a submitted report by ticket
//!   yeka locale-path  - Rewrite a route path to another locale

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init_logging();
    }

    if let Err(e) = commands::run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize logging with tracing
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yeka=debug,yeka_client=debug,yeka_form=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
