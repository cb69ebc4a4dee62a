//! unlog CLI entry point

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use unlog::cli::{Cli, Commands};

fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for document text and JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("UNLOG_LOG"))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Remove(args) => unlog::cli::remove::run(args),
        Commands::Check(args) => unlog::cli::check::run(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
