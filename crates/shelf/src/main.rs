//! Shelf CLI - Documentation browser.
//!
//! Provides commands for:
//! - `serve`: Start the documentation server (default)
//! - `build`: Build a corpus file from a markdown directory

mod commands;
mod error;
mod output;

use std::ffi::OsString;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Long flags that older invocations pass with a single dash.
const LEGACY_FLAGS: [&str; 3] = ["port", "version", "help"];

/// Shelf - Documentation browser.
#[derive(Parser)]
#[command(
    name = "shelf",
    about,
    disable_version_flag = true,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Print version.
    #[arg(short = 'v', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation server.
    Serve(ServeArgs),
    /// Build a corpus file from a markdown directory.
    Build(BuildArgs),
}

fn main() {
    let cli = Cli::parse_from(normalize_legacy_args(std::env::args_os()));
    let output = Output::new();

    if cli.version {
        let _ = console::Term::stdout().write_line(&format!("shelf {VERSION}"));
        return;
    }

    let verbose = match &cli.command {
        Some(Commands::Serve(args)) => args.verbose,
        Some(Commands::Build(_)) => false,
        None => cli.serve.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Some(Commands::Serve(args)) => serve(args),
        Some(Commands::Build(args)) => args.execute(),
        None => serve(cli.serve),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn serve(args: ServeArgs) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(args.execute(VERSION))
}

/// Rewrite `-port`, `-version` and `-help` (with or without `=value`) to
/// their double-dash forms.
fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 {
                return arg;
            }
            match arg.to_str() {
                Some(s) if is_legacy_flag(s) => OsString::from(format!("-{s}")),
                _ => arg,
            }
        })
        .collect()
}

fn is_legacy_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LEGACY_FLAGS.contains(&name)
}
