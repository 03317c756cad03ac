//! Graft CLI - scaffolding tool for wiring libraries into a project
//!
//! Entry point for the graft command-line application.

use anyhow::Result;
use clap::Parser;

use graft::cli::output::display_error;
use graft::cli::Cli;

fn tracing_level(cli: &Cli) -> tracing::Level {
    if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_level(&cli).into()),
        )
        .init();

    // Run the command and handle errors; the exit code is decided here,
    // not inside the command handlers.
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
