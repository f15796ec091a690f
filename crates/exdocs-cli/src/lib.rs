//! # exdocs-cli
//!
//! Command-line front ends for [`exdocs_core`]:
//!
//! - `exdocs-convert` turns the legacy JSON catalog into Markdown pages and
//!   the navigation manifest
//! - `exdocs-generate` writes a new example from documentation pages
//! - `exdocs-migrate` installs tooling and builds, serves or deploys the site
//!
//! Each binary parses its arguments, initializes logging and hands over to
//! one of the `run_*` functions here, which map failures to exit codes.

pub mod cli;
pub mod commands;
pub mod error;
pub mod prompt;
pub mod utils;

use std::process::ExitCode;

use colored::Colorize;

use crate::cli::{CommonArgs, ConvertCli, GenerateCli, MigrateCli};
use crate::error::{ErrorCategory, exit_code_from_error};
use crate::utils::logging::initialize_logging;

/// Entry point of `exdocs-convert`.
pub fn run_convert(cli: &ConvertCli) -> ExitCode {
    if let Err(code) = start(&cli.common) {
        return code;
    }
    finish(commands::convert::execute(cli), false)
}

/// Entry point of `exdocs-generate`.
pub async fn run_generate(cli: &GenerateCli) -> ExitCode {
    if let Err(code) = start(&cli.common) {
        return code;
    }
    finish(commands::generate::execute(cli).await, false)
}

/// Entry point of `exdocs-migrate`. Any failure exits with 1.
pub async fn run_migrate(cli: &MigrateCli) -> ExitCode {
    if let Err(code) = start(&cli.common) {
        return code;
    }
    finish(commands::migrate::execute(cli).await, true)
}

fn start(common: &CommonArgs) -> Result<(), ExitCode> {
    initialize_logging(common).map_err(|e| {
        eprintln!("Failed to initialize logging: {e}");
        ErrorCategory::Internal.as_exit_code()
    })
}

fn finish(result: anyhow::Result<()>, single_failure_code: bool) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} Error: {err}", "✗".red());
            if single_failure_code {
                ErrorCategory::Internal.as_exit_code()
            } else {
                ExitCode::from(exit_code_from_error(&err))
            }
        },
    }
}
