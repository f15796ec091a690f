//! Generate a new annotated example from documentation pages.

use std::process::ExitCode;

use clap::Parser;
use exdocs_cli::cli::GenerateCli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = GenerateCli::parse();
    exdocs_cli::run_generate(&cli).await
}
