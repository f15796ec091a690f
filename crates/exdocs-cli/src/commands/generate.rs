//! `exdocs-generate`: new example from documentation pages.

use std::fmt::Write as _;

use anyhow::Result;
use colored::Colorize;
use exdocs_core::synth::{GeminiClient, NavUpdate, SynthesisReport, Synthesizer, preflight};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::cli::GenerateCli;
use crate::prompt::{Presets, collect_request};
use crate::utils::validation::validate_example_name;

/// Check prerequisites, gather inputs, generate and report.
pub async fn execute(cli: &GenerateCli) -> Result<()> {
    let config = cli.common.load_config()?;
    if let Some(name) = &cli.name {
        validate_example_name(name)?;
    }
    let api_key = preflight(&config)?;

    let quiet = cli.common.quiet;
    if !quiet {
        println!("{}", "Welcome to the example generator!".bold().blue());
    }

    let request = collect_request(Presets {
        name: cli.name.clone(),
        focus: cli.focus.clone(),
        theme: cli.theme.clone(),
        urls: cli.urls.clone(),
    })?;
    if request.urls.is_empty() && !quiet {
        println!(
            "{} No URLs provided, using default URL: {}",
            "⚠".yellow(),
            config.generator.default_doc_url
        );
    }

    let client = GeminiClient::new(&config.generator, api_key)?;
    let synthesizer = Synthesizer::new(&config, client)?;

    let spinner = (!quiet).then(|| create_spinner("Fetching documentation and generating example..."));
    let result = synthesizer.run(&request).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if let Err(exdocs_core::Error::SchemaMismatch { raw, .. }) = &result {
        debug!("rejected generator reply: {raw}");
    }
    let report = result?;

    if let NavUpdate::Failed(reason) = &report.nav {
        eprintln!("{} Error updating navigation: {reason}", "✗".red());
    }
    if !quiet {
        print!("{}", format_report(&report));
    }
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    pb
}

/// Files written, navigation outcome and the image note.
pub fn format_report(report: &SynthesisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} Created example in folder: {}",
        "✓".green(),
        report.folder
    );
    let files = &report.files;
    let _ = writeln!(out, "  Code:     {}", files.python.display());
    let _ = writeln!(out, "  Shell:    {}", files.shell.display());
    if let Some(requests) = &files.requests {
        let _ = writeln!(out, "  Requests: {}", requests.display());
    }
    let _ = writeln!(out, "  Links:    {}", files.links.display());
    let _ = writeln!(
        out,
        "{} Created page '{}' in section '{}': {}",
        "✓".green(),
        report.heading.title,
        report.section,
        report.page.display()
    );

    match &report.nav {
        NavUpdate::Inserted { .. } => {
            let _ = writeln!(out, "{} Updated navigation with the new example", "✓".green());
        },
        NavUpdate::SectionMissing => {
            let _ = writeln!(
                out,
                "{} Section '{}' not found in navigation. Navigation not updated.",
                "⚠".yellow(),
                report.section
            );
        },
        NavUpdate::Failed(_) => {
            let _ = writeln!(out, "{} Navigation not updated", "⚠".yellow());
        },
    }

    if let (Some(image_dir), Some(image)) = (&report.image_dir, report.image_file_name()) {
        let _ = writeln!(
            out,
            "\n{} This example requires an image named '{image}'.",
            "NOTE:".red().bold()
        );
        let _ = writeln!(
            out,
            "{} Add the image to both {} and {}",
            "⚠".yellow(),
            report.example_dir.display(),
            image_dir.display()
        );
    }
    out
}
