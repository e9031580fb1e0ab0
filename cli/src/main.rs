#![deny(missing_docs)]

//! # oasgate CLI
//!
//! Command Line Interface for validating traffic against a Swagger 2.0 description.
//!
//! Supported Commands:
//! - `validate-request`: Checks a request document, printing the sanitized copy or the errors.
//! - `validate-response`: Checks a response document against its operation's responses.
//! - `operations`: Lists the resolved operations and their merged parameters.
//!
//! Results go to stdout; logs go to stderr (filter with `OASGATE_LOG`).
//! Exit codes: `0` accepted, `1` rejected, `2` the command itself failed.

use crate::error::CliResult;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod error;
mod loader;
mod operations;
mod validate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger 2.0 request/response validator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a request document.
    ValidateRequest(validate::RequestArgs),
    /// Validate a response document.
    ValidateResponse(validate::ResponseArgs),
    /// List resolved operations.
    Operations(operations::OperationsArgs),
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("OASGATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    let result = match &cli.command {
        Commands::ValidateRequest(args) => validate::execute_request(args, &mut stdout),
        Commands::ValidateResponse(args) => validate::execute_response(args, &mut stdout),
        Commands::Operations(args) => operations::execute(args, &mut stdout).map(|()| true),
    };

    exit_code(result, &mut io::stderr())
}

/// Maps a command outcome to the exit code, reporting a failure once on `err`.
fn exit_code(result: CliResult<bool>, err: &mut impl Write) -> ExitCode {
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            // Best effort: stderr may already be closed.
            let _ = writeln!(err, "{}", e);
            ExitCode::from(2)
        }
    }
}
