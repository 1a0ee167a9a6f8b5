//! # secret-env CLI
//!
//! Wires stdin/stdout and files to the encode/decode library.
//!
//! ## Usage
//!
//! ```bash
//! # env file -> Secret manifest (YAML by default)
//! secret-env encode -i .env -n my-secret
//!
//! # Write JSON to my-secret.json and apply it
//! kubectl create -f "$(secret-env encode -i .env -o my-secret -f json)"
//!
//! # Secret manifest -> env file
//! kubectl get secret my-secret -o yaml | secret-env decode
//! ```

pub mod config;
pub mod output;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use secret_env_codec::{decode_with_style, encode, Format, LineStyle};
use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use config::CliConfig;

/// Convert env files to Kubernetes Secrets and back
#[derive(Debug, Parser)]
#[command(name = "secret-env")]
#[command(
    version,
    about = "Quickly encode your configuration into Kubernetes Secrets",
    long_about = None,
    after_help = "\
Examples:
  secret-env encode -i .env -n my-secret
  secret-env encode -i .env -o my-secret -f json
  kubectl get secret my-secret -o yaml | secret-env decode
"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Encode your configuration as a Kubernetes Secret
    Encode(EncodeArgs),
    /// Decode a Kubernetes Secret into env file lines
    Decode(DecodeArgs),
    /// Print the current version
    Version,
}

#[derive(Debug, clap::Args)]
pub struct EncodeArgs {
    /// Name of the generated Secret (defaults to the output file name)
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Env file to encode (reads stdin when omitted)
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// File to write to (stdout when omitted); `.yaml`/`.json` is appended
    /// unless already present
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Format of the generated Secret: yaml or json
    #[arg(short = 'f', long)]
    pub format: Option<Format>,
}

#[derive(Debug, clap::Args)]
pub struct DecodeArgs {
    /// Manifest to decode (reads stdin when omitted); a `.json` suffix
    /// selects the JSON parser
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// File to write to (stdout when omitted)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Manifest format, overriding the input file suffix
    #[arg(short = 'f', long)]
    pub format: Option<Format>,

    /// Wrap values in double quotes so the output can be sourced or re-encoded
    #[arg(long)]
    pub quote: bool,
}

/// Run a parsed command, writing user-facing output to `stdout`
pub fn run(cli: Cli, config: &CliConfig, stdout: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Encode(args) => encode_command(&args, config, stdout),
        Commands::Decode(args) => decode_command(&args, stdout),
        Commands::Version => {
            writeln!(stdout, "secret-env {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
    }
}

fn encode_command(args: &EncodeArgs, config: &CliConfig, stdout: &mut dyn Write) -> Result<()> {
    let format = args.format.unwrap_or(config.default_format);
    let name = output::resolve_secret_name(
        args.name.as_deref(),
        args.output.as_deref(),
        &config.default_secret_name,
    );
    let input = open_input(args.input.as_deref())?;

    let manifest = encode(input, format, &name).context("error in encoding")?;

    match &args.output {
        Some(output) => {
            let path = output::encode_output_path(output, format);
            std::fs::write(&path, &manifest).context("writing to output file")?;
            info!("Wrote Secret {name:?} to {path}");
            // Print the file name so it can be piped into `kubectl create -f`
            writeln!(stdout, "{path}")?;
        }
        None => stdout.write_all(&manifest)?,
    }
    Ok(())
}

fn decode_command(args: &DecodeArgs, stdout: &mut dyn Write) -> Result<()> {
    let format = args.format.unwrap_or_else(|| {
        args.input
            .as_deref()
            .map_or(Format::Yaml, |path| Format::from_path_hint(&path.to_string_lossy()))
    });
    let style = if args.quote {
        LineStyle::Quoted
    } else {
        LineStyle::Bare
    };
    let input = open_input(args.input.as_deref())?;

    let lines = decode_with_style(input, format.codec(), style).context("error in decoding")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &lines).context("writing to output file")?;
            writeln!(stdout, "file \"{}\" created", path.display())?;
        }
        None => stdout.write_all(&lines)?,
    }
    Ok(())
}

/// Open the input file, or stdin when no path is given
///
/// Refuses to block on an interactive terminal.
fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            debug!("Reading input from {}", path.display());
            let file = File::open(path).context("reading input file")?;
            Ok(Box::new(file))
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(no_input_error(&mut io::stderr().lock()));
            }
            debug!("Reading input from stdin");
            Ok(Box::new(stdin))
        }
    }
}

/// Print usage to `stderr` and build the error for a missing input
fn no_input_error(stderr: &mut dyn Write) -> anyhow::Error {
    // Best effort: the returned error is still reported if stderr is gone
    let _ = writeln!(stderr, "{}", Cli::command().render_usage());
    anyhow!("expecting input on stdin (pipe data in or pass --input, see --help)")
}
