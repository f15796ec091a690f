//! `exdocs-migrate`: run the external build and publish steps.

use std::fmt::Write as _;

use anyhow::Result;
use colored::Colorize;
use exdocs_core::Config;
use exdocs_core::migrate::{MigrationReport, Pipeline};

use crate::cli::MigrateCli;

/// Run the selected steps in order, stopping at the first failure.
///
/// A failing process has its captured output printed before the error is
/// returned.
pub async fn execute(cli: &MigrateCli) -> Result<()> {
    let config = cli.common.load_config()?;
    let selection = cli.selection();
    let plan = selection.plan();
    let quiet = cli.common.quiet;

    let pipeline = Pipeline::new(&config);
    let result = pipeline
        .run(&plan, |step| {
            if !quiet {
                println!("\n{}...", step.description());
            }
        })
        .await;

    match result {
        Ok(report) => {
            if !quiet {
                print!(
                    "{}",
                    format_report(&report, selection.is_default(), cli.common.verbose, &config)
                );
            }
            Ok(())
        },
        Err(err) => {
            if let exdocs_core::Error::StepFailed { stdout, stderr, .. } = &err {
                eprint!("{}", format_captured(stdout, stderr));
            }
            Err(err.into())
        },
    }
}

/// Captured streams of a failed step; empty streams are left out.
pub fn format_captured(stdout: &str, stderr: &str) -> String {
    let mut out = String::new();
    if !stdout.trim().is_empty() {
        let _ = writeln!(out, "Command output:\n{}", stdout.trim_end());
    }
    if !stderr.trim().is_empty() {
        let _ = writeln!(out, "Command error:\n{}", stderr.trim_end());
    }
    out
}

/// Finished steps, their output when `verbose`, and next steps after a default run.
pub fn format_report(report: &MigrationReport, default_run: bool, verbose: bool, config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} Migration completed successfully!", "✓".green());
    for record in &report.steps {
        let _ = writeln!(out, "  {} {}", "✓".green(), record.step.description());
        if verbose && !record.output.stdout.trim().is_empty() {
            for line in record.output.stdout.trim_end().lines() {
                let _ = writeln!(out, "      {line}");
            }
        }
    }

    if default_run {
        let _ = writeln!(out, "\nNext steps:");
        let _ = writeln!(out, "1. Preview the site locally: {}", config.migrate.serve.join(" "));
        let _ = writeln!(out, "2. Deploy to GitHub Pages: {}", config.migrate.deploy.join(" "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use exdocs_core::migrate::{ProcessOutput, StepKind, StepRecord};
    use std::path::Path;

    fn record(step: StepKind, stdout: &str) -> StepRecord {
        StepRecord {
            step,
            output: ProcessOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        }
    }

    #[test]
    fn test_report_lists_steps_and_hints() {
        colored::control::set_override(false);
        let config = Config::with_root(Path::new("/srv/site"));
        let report = MigrationReport {
            steps: vec![record(StepKind::Dependencies, "uv 0.5\n"), record(StepKind::Build, "")],
        };

        let text = format_report(&report, true, false, &config);
        assert!(text.contains("✓ Installing dependencies"));
        assert!(text.contains("✓ Building site"));
        assert!(!text.contains("uv 0.5"));
        assert!(text.contains("1. Preview the site locally: mkdocs serve"));

        let verbose = format_report(&report, false, true, &config);
        assert!(verbose.contains("      uv 0.5"));
        assert!(!verbose.contains("Next steps"));
    }

    #[test]
    fn test_captured_streams() {
        assert_eq!(format_captured("", "  \n"), "");
        assert_eq!(
            format_captured("built\n", "oops\n"),
            "Command output:\nbuilt\nCommand error:\noops\n"
        );
    }
}
