//! # secret-env
//!
//! Command-line front end for `secret_env_codec`.
//!
//! Encodes env files into Kubernetes `Secret` manifests and decodes them
//! back. Logs go to stderr so stdout only ever carries the converted output.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, CliConfig};

fn main() -> ExitCode {
    let config = CliConfig::from_env();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_ansi(config.log_enable_color)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    let result = cli::run(cli, &config, &mut stdout)
        .and_then(|()| stdout.flush().context("writing to stdout"));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
