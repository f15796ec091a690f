//! Install tooling, then convert, build, serve or deploy the site.

use std::process::ExitCode;

use clap::Parser;
use exdocs_cli::cli::MigrateCli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = MigrateCli::parse();
    exdocs_cli::run_migrate(&cli).await
}
