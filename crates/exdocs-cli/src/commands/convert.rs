//! `exdocs-convert`: legacy catalog to Markdown.

use std::fmt::Write as _;

use anyhow::Result;
use colored::Colorize;
use exdocs_core::Config;
use exdocs_core::convert::{CatalogSummary, ConversionReport, Converter};

use crate::cli::ConvertCli;

/// Run the converter, or only inspect the catalog with `--check`.
pub fn execute(cli: &ConvertCli) -> Result<()> {
    let config = cli.common.load_config()?;
    let converter = Converter::new(&config);

    if cli.check {
        let summary = converter.inspect()?;
        print!("{}", format_summary(&summary));
        return Ok(());
    }

    if !cli.common.quiet {
        println!("Converting examples to Markdown...");
    }
    let report = converter.convert()?;
    if !cli.common.quiet {
        print!("{}", format_report(&report, &config));
    }
    Ok(())
}

/// Inspection output: totals, per-section counts, then the first section's examples.
pub fn format_summary(summary: &CatalogSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Found {} examples and {} sections.",
        summary.examples, summary.sections
    );

    let _ = writeln!(out, "\nSections:");
    for section in &summary.per_section {
        let _ = writeln!(
            out,
            "  - {} ({}): {} examples",
            section.title, section.id, section.examples
        );
    }

    if let Some(first) = &summary.first_section {
        let _ = writeln!(out, "\nExamples in {first}:");
        for example in &summary.first_section_examples {
            let _ = writeln!(out, "  - {} ({}):", example.title, example.id);
            let _ = writeln!(out, "    - {} code segments", example.code_segments);
            let _ = writeln!(out, "    - {} shell segments", example.shell_segments);
            let _ = writeln!(out, "    - {} images", example.images);
        }
    }

    let _ = writeln!(out, "\n{} Catalog loaded successfully.", "✓".green());
    out
}

/// Completion message with counts and next steps.
pub fn format_report(report: &ConversionReport, config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} Converted {} sections and {} pages into '{}'",
        "✓".green(),
        report.sections,
        report.pages,
        report.docs_dir.display()
    );
    if report.images > 0 {
        let _ = writeln!(out, "  {} images copied", report.images);
    }
    if report.images_skipped > 0 {
        let _ = writeln!(
            out,
            "{} {} image sources not found and skipped",
            "⚠".yellow(),
            report.images_skipped
        );
    }
    if report.orphans > 0 {
        let _ = writeln!(
            out,
            "{} {} examples reference unknown sections and were skipped",
            "⚠".yellow(),
            report.orphans
        );
    }
    let _ = writeln!(out, "  Navigation written to '{}'", report.manifest.display());

    let build = config.migrate.build.join(" ");
    let serve = config.migrate.serve.join(" ");
    let _ = writeln!(out, "\nNext steps:");
    let _ = writeln!(out, "1. Build the site: {build}");
    let _ = writeln!(out, "2. Preview the site: {serve}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use exdocs_core::convert::{ExampleSummary, SectionSummary};
    use std::path::{Path, PathBuf};

    #[test]
    fn test_summary_lists_first_section_examples() {
        colored::control::set_override(false);
        let summary = CatalogSummary {
            examples: 2,
            sections: 1,
            per_section: vec![SectionSummary {
                id: "s1".to_string(),
                title: "Text".to_string(),
                examples: 2,
            }],
            first_section: Some("Text".to_string()),
            first_section_examples: vec![ExampleSummary {
                id: "e1".to_string(),
                title: "Hello".to_string(),
                code_segments: 3,
                shell_segments: 1,
                images: 0,
            }],
        };
        let text = format_summary(&summary);
        assert!(text.starts_with("Found 2 examples and 1 sections."));
        assert!(text.contains("  - Text (s1): 2 examples"));
        assert!(text.contains("Examples in Text:\n  - Hello (e1):\n    - 3 code segments"));
    }

    #[test]
    fn test_report_mentions_skips_and_next_steps() {
        colored::control::set_override(false);
        let config = Config::with_root(Path::new("/srv/site"));
        let report = ConversionReport {
            sections: 2,
            pages: 5,
            images: 0,
            images_skipped: 1,
            orphans: 0,
            docs_dir: PathBuf::from("/srv/site/docs"),
            manifest: PathBuf::from("/srv/site/mkdocs.yml"),
        };
        let text = format_report(&report, &config);
        assert!(text.contains("Converted 2 sections and 5 pages"));
        assert!(text.contains("1 image sources not found"));
        assert!(!text.contains("unknown sections"));
        assert!(text.contains("Next steps:"));
    }
}
