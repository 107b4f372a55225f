//! Jotter - local notes kept in step across every running instance
//!
//! Each invocation opens the note store in `.jotter/`, applies one command
//! and flushes. `jotter watch` stays open and reconciles writes made by
//! other instances as they land.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use jotter_core::error::JotterError;
use jotter_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return exit_on_parse_error(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else if !cli.quiet {
                eprintln!("error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Help and version go to clap. Any other parse failure is a usage error,
/// reported as a JSON envelope when argv asked for `--format json`.
fn exit_on_parse_error(err: clap::Error) -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if !err.use_stderr() || !requests_json(&args) {
        err.exit();
    }
    let error = JotterError::UsageError(err.to_string());
    eprintln!("{}", error.to_json());
    ExitCode::from(error.exit_code() as u8)
}

fn requests_json(args: &[String]) -> bool {
    args.iter().any(|arg| arg == "--format=json")
        || args
            .windows(2)
            .any(|pair| pair[0] == "--format" && pair[1] == "json")
}
