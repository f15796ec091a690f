//! Convert the legacy JSON catalog into a Markdown documentation tree.

use std::process::ExitCode;

use clap::Parser;
use exdocs_cli::cli::ConvertCli;

fn main() -> ExitCode {
    let cli = ConvertCli::parse();
    exdocs_cli::run_convert(&cli)
}
