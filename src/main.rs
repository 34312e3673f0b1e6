//! cbor - Turns CBOR into JSON or JSON into CBOR
//!
//! Reads one document from a file or standard input and writes it to
//! standard output in the other format.

use cbor_json::cli::{Cli, USAGE};
use cbor_json::input::Source;
use cbor_json::{convert, CliError, Result};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

/// Main application entry point
fn run() -> i32 {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            report(&err);
            return err.exit_code();
        }
    };
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(()) => 0,
        Err(err) => {
            report(&err);
            err.exit_code()
        }
    }
}

/// Read, convert, and write one document
fn execute(cli: &Cli) -> Result<()> {
    let source = Source::resolve(cli.file.as_deref())?;
    let input = source.read_all()?;
    let conversion = convert(&input, &cli.options())?;
    tracing::debug!(
        from = %conversion.input,
        to = %conversion.input.opposite(),
        bytes = conversion.output.len(),
        "converted"
    );

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&conversion.output)
        .and_then(|()| stdout.flush())
        .map_err(CliError::Output)
}

/// Print the error, and the usage text where it helps, to stderr
fn report(err: &CliError) {
    let mut stderr = io::stderr().lock();
    let prefix = console::style("ERROR:").red().bold().for_stderr();
    let _ = writeln!(stderr, "{prefix} {err}.");
    if err.shows_usage() {
        let _ = write!(stderr, "\n{USAGE}");
    }
}

/// Diagnostics go to stderr; stdout carries only the converted document
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
