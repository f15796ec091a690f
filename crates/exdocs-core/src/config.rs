//! Project configuration.
//!
//! Every tool works against an explicit project root rather than changing the
//! process working directory. Settings come from an optional `exdocs.toml`
//! in that root; every key has a default, so a missing file means defaults.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [paths]
//! data_dir = "data"
//! docs_dir = "docs"
//!
//! [site]
//! name = "Gemini by Example"
//! primary_color = "indigo"
//!
//! [generator]
//! model = "gemini-2.0-flash"
//! api_key_env = "GEMINI_API_KEY"
//!
//! [migrate]
//! build = ["mkdocs", "build"]
//! ```
//!
//! ```rust
//! use exdocs_core::Config;
//! use std::path::Path;
//!
//! let config = Config::with_root(Path::new("/srv/site"));
//! assert_eq!(config.docs_dir(), Path::new("/srv/site/docs"));
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Name of the project configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "exdocs.toml";

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory all relative paths are resolved against.
    pub root: PathBuf,
    /// Project-relative paths.
    pub paths: PathsConfig,
    /// Static-site presentation settings.
    pub site: SiteConfig,
    /// Generation API settings.
    pub generator: GeneratorConfig,
    /// External commands used by the migration pipeline.
    pub migrate: MigrateConfig,
}

/// On-disk shape of `exdocs.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    paths: PathsConfig,
    site: SiteConfig,
    generator: GeneratorConfig,
    migrate: MigrateConfig,
}

/// Project-relative locations of inputs and outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `sections.json` and `examples.json`.
    pub data_dir: PathBuf,
    /// Markdown output tree.
    pub docs_dir: PathBuf,
    /// Numbered example source directories.
    pub examples_dir: PathBuf,
    /// Navigation manifest consumed by the site generator.
    pub site_config: PathBuf,
    /// Directory the site generator builds into.
    pub site_output: PathBuf,
    /// Contributing guidelines holding the example format templates.
    pub contributing: PathBuf,
    /// Reference example embedded in generation prompts.
    pub template_example: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            docs_dir: PathBuf::from("docs"),
            examples_dir: PathBuf::from("examples"),
            site_config: PathBuf::from("mkdocs.yml"),
            site_output: PathBuf::from("site"),
            contributing: PathBuf::from("CONTRIBUTING.md"),
            template_example: PathBuf::from("examples/002-streaming-text"),
        }
    }
}

/// Presentation settings written into the navigation manifest and pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub name: String,
    /// One-line site description.
    pub description: String,
    /// Theme name understood by the site generator.
    pub theme: String,
    /// Primary palette colour.
    pub primary_color: String,
    /// Accent palette colour.
    pub accent_color: String,
    /// Fence language for example code blocks.
    pub code_language: String,
    /// Link text prefix in "Further Information" lists.
    pub link_label: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Gemini by Example".to_string(),
            description: "Learn the Gemini API through annotated examples".to_string(),
            theme: "material".to_string(),
            primary_color: "indigo".to_string(),
            accent_color: "indigo".to_string(),
            code_language: "python".to_string(),
            link_label: "Gemini docs link".to_string(),
        }
    }
}

/// Generation API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Model identifier.
    pub model: String,
    /// Base URL of the Generative Language REST API.
    pub api_base: String,
    /// Environment variable holding the API credential.
    pub api_key_env: String,
    /// URL used when no documentation URL is supplied.
    pub default_doc_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            default_doc_url: "https://ai.google.dev/tutorials/python_quickstart".to_string(),
            timeout_secs: 120,
        }
    }
}

impl GeneratorConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Argument vectors for each external migration step.
///
/// Every command runs with the project root as its working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    /// Checks the Python toolchain manager is available.
    pub check_tool: Vec<String>,
    /// Creates the virtual environment.
    pub create_env: Vec<String>,
    /// Installs the site generator and its plugins.
    pub sync_deps: Vec<String>,
    /// File that must exist before dependencies are installed.
    pub dependency_manifest: PathBuf,
    /// Conversion command; `None` runs the sibling `exdocs-convert` binary.
    pub convert: Option<Vec<String>>,
    /// Builds the static site.
    pub build: Vec<String>,
    /// Serves the site locally.
    pub serve: Vec<String>,
    /// Publishes the site.
    pub deploy: Vec<String>,
    /// Copies the built site into the docs directory.
    pub copy: Vec<String>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        let argv = |parts: &[&str]| parts.iter().map(|p| (*p).to_string()).collect();
        Self {
            check_tool: argv(&["uv", "--version"]),
            create_env: argv(&["uv", "venv"]),
            sync_deps: argv(&["uv", "sync"]),
            dependency_manifest: PathBuf::from("pyproject.toml"),
            convert: None,
            build: argv(&["mkdocs", "build"]),
            serve: argv(&["mkdocs", "serve"]),
            deploy: argv(&["mkdocs", "gh-deploy"]),
            copy: argv(&["cp", "-r", "site/.", "docs/"]),
        }
    }
}

impl Config {
    /// Default configuration anchored at `root`.
    #[must_use]
    pub fn with_root(root: &Path) -> Self {
        Self::from_file(root, ConfigFile::default())
    }

    /// Load `exdocs.toml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_from(root, &root.join(CONFIG_FILE_NAME), false)
    }

    /// Load configuration from an explicit file.
    ///
    /// When `required` is false a missing file yields defaults; when true it
    /// is reported as [`Error::NotFound`].
    pub fn load_from(root: &Path, file: &Path, required: bool) -> Result<Self> {
        if !file.exists() {
            if required {
                return Err(Error::NotFound(file.display().to_string()));
            }
            tracing::debug!("no config at {}, using defaults", file.display());
            return Ok(Self::with_root(root));
        }
        let raw = std::fs::read_to_string(file).map_err(|e| Error::io_at(file, e))?;
        let parsed: ConfigFile = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", file.display())))?;
        tracing::debug!("loaded config from {}", file.display());
        Ok(Self::from_file(root, parsed))
    }

    fn from_file(root: &Path, file: ConfigFile) -> Self {
        Self {
            root: root.to_path_buf(),
            paths: file.paths,
            site: file.site,
            generator: file.generator,
            migrate: file.migrate,
        }
    }

    /// Resolve a project-relative path against the root.
    #[must_use]
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Legacy JSON data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.resolve(&self.paths.data_dir)
    }

    /// Markdown output tree.
    #[must_use]
    pub fn docs_dir(&self) -> PathBuf {
        self.resolve(&self.paths.docs_dir)
    }

    /// Numbered example directories.
    #[must_use]
    pub fn examples_dir(&self) -> PathBuf {
        self.resolve(&self.paths.examples_dir)
    }

    /// Navigation manifest file.
    #[must_use]
    pub fn site_config_path(&self) -> PathBuf {
        self.resolve(&self.paths.site_config)
    }

    /// Built site directory.
    #[must_use]
    pub fn site_output_dir(&self) -> PathBuf {
        self.resolve(&self.paths.site_output)
    }

    /// Contributing guidelines file.
    #[must_use]
    pub fn contributing_path(&self) -> PathBuf {
        self.resolve(&self.paths.contributing)
    }

    /// Reference example directory.
    #[must_use]
    pub fn template_example_dir(&self) -> PathBuf {
        self.resolve(&self.paths.template_example)
    }

    /// Read the API credential named by `generator.api_key_env`.
    ///
    /// Missing or blank values are a configuration error naming the variable.
    pub fn api_key_from_env(&self) -> Result<String> {
        let name = &self.generator.api_key_env;
        match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(Error::Config(format!(
                "{name} not found in environment variables. Export it or add it to your shell profile before running the generator"
            ))),
        }
    }
}
