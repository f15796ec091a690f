//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on CLI flags and environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::CommonArgs;

/// Log level selected by the verbosity flags.
#[must_use]
pub const fn level_for(args: &CommonArgs) -> Level {
    if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Initialize the logging subsystem based on CLI flags.
///
/// Logs go to stderr so reports on stdout stay clean.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(args: &CommonArgs) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(args))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if args.no_color || env_no_color {
        color_control::set_override(false);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(verbose: bool, quiet: bool) -> CommonArgs {
        CommonArgs {
            project_root: PathBuf::from("."),
            config: None,
            verbose,
            quiet,
            no_color: false,
        }
    }

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(&args(true, false)), Level::DEBUG);
        assert_eq!(level_for(&args(false, true)), Level::ERROR);
        assert_eq!(level_for(&args(false, false)), Level::WARN);
    }
}
