//! Command-line argument definitions for the three tools.

use std::path::PathBuf;

use clap::{Args, Parser};
use exdocs_core::Config;
use exdocs_core::migrate::StepSelection;

/// Options shared by every tool.
#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    /// Project directory all paths are resolved against
    #[arg(long, env = "EXDOCS_PROJECT_ROOT", default_value = ".", value_name = "DIR")]
    pub project_root: PathBuf,

    /// Configuration file (defaults to <project-root>/exdocs.toml)
    #[arg(long, env = "EXDOCS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CommonArgs {
    /// Load the project configuration.
    ///
    /// An explicit `--config` file must exist; the default file is optional.
    pub fn load_config(&self) -> exdocs_core::Result<Config> {
        match &self.config {
            Some(file) => Config::load_from(&self.project_root, file, true),
            None => Config::load(&self.project_root),
        }
    }
}

/// Convert the legacy JSON catalog into Markdown pages and a navigation manifest.
#[derive(Parser, Clone, Debug)]
#[command(name = "exdocs-convert", version, about, long_about = None)]
pub struct ConvertCli {
    /// Options shared by every tool.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Inspect the catalog and report counts without writing anything
    #[arg(long)]
    pub check: bool,
}

/// Generate a new annotated example from documentation pages.
#[derive(Parser, Clone, Debug)]
#[command(name = "exdocs-generate", version, about, long_about = None)]
pub struct GenerateCli {
    /// Options shared by every tool.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Example name (lowercase letters, digits and hyphens)
    #[arg(long)]
    pub name: Option<String>,

    /// What the example should demonstrate
    #[arg(long)]
    pub focus: Option<String>,

    /// Optional theme to build the example around
    #[arg(long)]
    pub theme: Option<String>,

    /// Documentation URL to draw from (repeatable)
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,
}

/// Install tooling, convert, build, serve and deploy the documentation site.
///
/// With no flags every step except deploy runs.
#[derive(Parser, Clone, Debug)]
#[command(name = "exdocs-migrate", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct MigrateCli {
    /// Options shared by every tool.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Run the conversion
    #[arg(long)]
    pub convert_only: bool,

    /// Build the site
    #[arg(long)]
    pub build_only: bool,

    /// Serve the site locally
    #[arg(long)]
    pub serve: bool,

    /// Deploy the site
    #[arg(long)]
    pub deploy: bool,

    /// Copy the built site into the docs directory
    #[arg(long)]
    pub copy_to_docs: bool,
}

impl MigrateCli {
    /// Steps requested on the command line.
    #[must_use]
    pub const fn selection(&self) -> StepSelection {
        StepSelection {
            convert: self.convert_only,
            build: self.build_only,
            copy_to_docs: self.copy_to_docs,
            serve: self.serve,
            deploy: self.deploy,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use exdocs_core::migrate::StepKind;

    #[test]
    fn test_clis_are_well_formed() {
        ConvertCli::command().debug_assert();
        GenerateCli::command().debug_assert();
        MigrateCli::command().debug_assert();
    }

    #[test]
    fn test_generate_collects_repeated_urls() {
        let cli = GenerateCli::try_parse_from([
            "exdocs-generate",
            "--name",
            "tool-use",
            "--url",
            "https://a.example",
            "--url",
            "https://b.example",
        ])
        .unwrap();
        assert_eq!(cli.name.as_deref(), Some("tool-use"));
        assert_eq!(cli.urls, ["https://a.example", "https://b.example"]);
        assert!(cli.focus.is_none());
    }

    #[test]
    fn test_migrate_flags_combine() {
        let cli = MigrateCli::try_parse_from(["exdocs-migrate", "--build-only", "--deploy"]).unwrap();
        assert_eq!(
            cli.selection().plan(),
            [
                StepKind::Dependencies,
                StepKind::Build,
                StepKind::Marker,
                StepKind::Deploy
            ]
        );

        let cli = MigrateCli::try_parse_from(["exdocs-migrate"]).unwrap();
        assert!(cli.selection().is_default());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(ConvertCli::try_parse_from(["exdocs-convert", "-v", "-q"]).is_err());
    }
}
