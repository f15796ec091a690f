//! Migration pipeline: install tooling, convert, build, publish.
//!
//! Steps always run in the same order and the first failure stops the run.
//! Each step checks a file-system precondition before launching its
//! process, so a build is refused until a manifest exists and a copy is
//! refused until a site was built.

mod process;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

pub use process::{OutputMode, ProcessOutput, run_argv};

use crate::config::Config;
use crate::{Error, Result};

/// Name of the marker file that turns off Jekyll processing on GitHub Pages.
pub const MARKER_FILE: &str = ".nojekyll";

/// One pipeline step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StepKind {
    /// Check the toolchain manager, create the environment, install packages.
    Dependencies,
    /// Run the legacy converter.
    Convert,
    /// Build the static site.
    Build,
    /// Write the marker file into the built site and the docs directory.
    Marker,
    /// Copy the built site into the docs directory.
    CopyToOutput,
    /// Serve the site locally.
    Serve,
    /// Publish the site.
    Deploy,
}

impl StepKind {
    /// Every step, in execution order.
    pub const ALL: [Self; 7] = [
        Self::Dependencies,
        Self::Convert,
        Self::Build,
        Self::Marker,
        Self::CopyToOutput,
        Self::Serve,
        Self::Deploy,
    ];

    /// Short identifier used in logs and errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::Convert => "convert",
            Self::Build => "build",
            Self::Marker => "marker",
            Self::CopyToOutput => "copy",
            Self::Serve => "serve",
            Self::Deploy => "deploy",
        }
    }

    /// Progress line shown when the step starts.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Dependencies => "Installing dependencies",
            Self::Convert => "Converting examples to Markdown",
            Self::Build => "Building site",
            Self::Marker => "Creating .nojekyll markers",
            Self::CopyToOutput => "Copying site to docs directory",
            Self::Serve => "Starting local server",
            Self::Deploy => "Deploying to GitHub Pages",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which optional steps were requested. Flags combine freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct StepSelection {
    /// Run the converter.
    pub convert: bool,
    /// Build the site and write the marker files.
    pub build: bool,
    /// Copy the built site into the docs directory.
    pub copy_to_docs: bool,
    /// Serve the site.
    pub serve: bool,
    /// Publish the site.
    pub deploy: bool,
}

impl StepSelection {
    /// True when no flag is set, which selects the default sequence.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        !(self.convert || self.build || self.copy_to_docs || self.serve || self.deploy)
    }

    /// Steps to run, in order.
    ///
    /// Dependencies always run first. With no flags every step except
    /// deploy runs.
    ///
    /// ```rust
    /// use exdocs_core::migrate::{StepKind, StepSelection};
    ///
    /// let only_build = StepSelection { build: true, ..StepSelection::default() };
    /// assert_eq!(
    ///     only_build.plan(),
    ///     [StepKind::Dependencies, StepKind::Build, StepKind::Marker]
    /// );
    /// ```
    #[must_use]
    pub fn plan(&self) -> Vec<StepKind> {
        let all = self.is_default();
        StepKind::ALL
            .into_iter()
            .filter(|step| match step {
                StepKind::Dependencies => true,
                StepKind::Convert => all || self.convert,
                StepKind::Build | StepKind::Marker => all || self.build,
                StepKind::CopyToOutput => all || self.copy_to_docs,
                StepKind::Serve => all || self.serve,
                StepKind::Deploy => self.deploy,
            })
            .collect()
    }
}

/// Output of one finished step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// Step that ran.
    pub step: StepKind,
    /// Captured output of its processes, concatenated.
    pub output: ProcessOutput,
}

/// Steps completed by a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Finished steps, in order.
    pub steps: Vec<StepRecord>,
}

impl MigrationReport {
    /// Kinds of the finished steps.
    #[must_use]
    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|r| r.step).collect()
    }
}

/// Runs migration steps for one project.
pub struct Pipeline<'a> {
    config: &'a Config,
    convert_command: Option<Vec<String>>,
}

impl<'a> Pipeline<'a> {
    /// Pipeline using the configured commands.
    ///
    /// Without a configured `convert` command the `exdocs-convert` binary
    /// next to the running executable is used.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        let convert_command = config.migrate.convert.clone().or_else(|| {
            let sibling = sibling_converter()?;
            Some(vec![
                sibling.display().to_string(),
                "--project-root".to_string(),
                config.root.display().to_string(),
            ])
        });
        Self {
            config,
            convert_command,
        }
    }

    /// Run `plan` in order, calling `on_start` before each step.
    pub async fn run(
        &self,
        plan: &[StepKind],
        mut on_start: impl FnMut(StepKind),
    ) -> Result<MigrationReport> {
        let mut report = MigrationReport::default();
        for &step in plan {
            on_start(step);
            let output = self.run_step(step).await?;
            info!("{step} finished");
            report.steps.push(StepRecord { step, output });
        }
        Ok(report)
    }

    /// Check the precondition of `step` and run it.
    pub async fn run_step(&self, step: StepKind) -> Result<ProcessOutput> {
        let migrate = &self.config.migrate;
        match step {
            StepKind::Dependencies => self.install_dependencies().await,
            StepKind::Convert => {
                let argv = self.convert_command.as_ref().ok_or_else(|| Error::Precondition {
                    step: step.name().to_string(),
                    reason: "exdocs-convert not found next to this executable; set migrate.convert in exdocs.toml".to_string(),
                })?;
                self.exec(step, argv, OutputMode::Capture).await
            },
            StepKind::Build => {
                self.require_manifest(step)?;
                self.exec(step, &migrate.build, OutputMode::Capture).await
            },
            StepKind::Marker => {
                self.write_markers()?;
                Ok(ProcessOutput::default())
            },
            StepKind::CopyToOutput => {
                let site = self.config.site_output_dir();
                require(step, &site, "site directory not found. Build the site first.")?;
                let docs = self.config.docs_dir();
                std::fs::create_dir_all(&docs).map_err(|e| Error::io_at(&docs, e))?;
                self.exec(step, &migrate.copy, OutputMode::Capture).await
            },
            StepKind::Serve => {
                self.require_manifest(step)?;
                self.exec(step, &migrate.serve, OutputMode::Inherit).await
            },
            StepKind::Deploy => {
                self.require_manifest(step)?;
                self.exec(step, &migrate.deploy, OutputMode::Capture).await
            },
        }
    }

    async fn install_dependencies(&self) -> Result<ProcessOutput> {
        let migrate = &self.config.migrate;
        let step = StepKind::Dependencies;
        let mut combined = self.exec(step, &migrate.check_tool, OutputMode::Capture).await?;

        let manifest = self.config.resolve(&migrate.dependency_manifest);
        require(
            step,
            &manifest,
            &format!("{} not found.", migrate.dependency_manifest.display()),
        )?;

        for argv in [&migrate.create_env, &migrate.sync_deps] {
            let out = self.exec(step, argv, OutputMode::Capture).await?;
            combined.stdout.push_str(&out.stdout);
            combined.stderr.push_str(&out.stderr);
        }
        Ok(combined)
    }

    fn require_manifest(&self, step: StepKind) -> Result<()> {
        let manifest = self.config.site_config_path();
        require(
            step,
            &manifest,
            &format!("{} not found. Run the conversion first.", self.config.paths.site_config.display()),
        )
    }

    fn write_markers(&self) -> Result<()> {
        let site = self.config.site_output_dir();
        std::fs::create_dir_all(&site).map_err(|e| Error::io_at(&site, e))?;
        touch(&site.join(MARKER_FILE))?;

        let docs = self.config.docs_dir();
        if docs.is_dir() {
            touch(&docs.join(MARKER_FILE))?;
        }
        Ok(())
    }

    async fn exec(&self, step: StepKind, argv: &[String], mode: OutputMode) -> Result<ProcessOutput> {
        run_argv(step.name(), argv, &self.config.root, mode).await
    }
}

fn require(step: StepKind, path: &Path, reason: &str) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::Precondition {
            step: step.name().to_string(),
            reason: reason.to_string(),
        })
    }
}

fn touch(path: &Path) -> Result<()> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .map_err(|e| Error::io_at(path, e))
}

fn sibling_converter() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let candidate = exe.with_file_name(format!("exdocs-convert{}", std::env::consts::EXE_SUFFIX));
    candidate.is_file().then_some(candidate)
}
