//! Example synthesis: documentation URLs in, a numbered example directory,
//! a documentation page and a navigation entry out.
//!
//! A run walks these steps in order and stops at the first fatal error:
//!
//! 1. pick the next example number from the examples directory
//! 2. fetch each URL (failures become empty context)
//! 3. build the prompt from context, guidelines and the reference example
//! 4. generate and validate against the [`GeneratedExample`] schema
//! 5. write the sources and the link sidecar
//! 6. render the page under the classified section
//! 7. insert the page into the navigation manifest (failures are reported,
//!    not raised)
//! 8. create the section's image directory when an image is required
//!
//! Nothing is written before step 5, so a schema mismatch leaves the project
//! untouched.

mod client;
mod guidelines;
mod numbering;
mod page;
mod prompt;
mod section;

use std::path::PathBuf;

use tracing::{info, warn};

pub use client::{GeminiClient, GenerationClient, parse_generated, parse_response, response_schema};
pub use guidelines::{FormatGuidelines, TemplateExample};
pub use numbering::{example_folder_name, example_number, example_stem, next_example_number};
pub use page::{ExampleFiles, PageHeading, render_page, write_example_files};
pub use prompt::{PromptParts, assemble_context, build_prompt};
pub use section::{FALLBACK_SECTION, SECTION_KEYWORDS, classify_focus};

use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::nav::{NavInsert, SiteManifest};
use crate::slug::section_dir_name;
use crate::types::GeneratedExample;
use crate::{Error, Result};

/// User input for one synthesis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleRequest {
    /// Example slug, already validated as `^[a-z0-9-]+$`.
    pub name: String,
    /// What the example should demonstrate.
    pub focus: String,
    /// Optional topical theme; empty for none.
    pub theme: String,
    /// Documentation URLs; empty means the configured default URL.
    pub urls: Vec<String>,
}

/// What happened to the navigation manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavUpdate {
    /// Entry added at this index of the section list.
    Inserted {
        /// Index of the new entry.
        position: usize,
    },
    /// Section not present; manifest unchanged.
    SectionMissing,
    /// Manifest could not be read or written.
    Failed(String),
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct SynthesisReport {
    /// `NNN-name` directory name.
    pub folder: String,
    /// Example directory.
    pub example_dir: PathBuf,
    /// Files written into the example directory.
    pub files: ExampleFiles,
    /// Title and description used on the page.
    pub heading: PageHeading,
    /// Navigation section the example was placed in.
    pub section: String,
    /// Rendered documentation page.
    pub page: PathBuf,
    /// Navigation outcome.
    pub nav: NavUpdate,
    /// Image directory, when the example needs an image.
    pub image_dir: Option<PathBuf>,
    /// URLs actually used, including the default when none were given.
    pub urls: Vec<String>,
}

impl SynthesisReport {
    /// File name the example image is expected under.
    #[must_use]
    pub fn image_file_name(&self) -> Option<String> {
        self.image_dir
            .as_ref()
            .map(|_| format!("{}.png", example_stem(&self.folder)))
    }
}

/// Check what a run needs before touching the network.
///
/// Returns the API credential. The navigation manifest must already exist.
pub fn preflight(config: &Config) -> Result<String> {
    let api_key = config.api_key_from_env()?;
    let manifest = config.site_config_path();
    if !manifest.exists() {
        return Err(Error::NotFound(format!(
            "{} (run exdocs-convert first)",
            manifest.display()
        )));
    }
    Ok(api_key)
}

/// Drives one synthesis run against a project.
pub struct Synthesizer<'a, C> {
    config: &'a Config,
    client: C,
    fetcher: Fetcher,
}

impl<'a, C: GenerationClient> Synthesizer<'a, C> {
    /// Synthesizer using `client` for generation.
    pub fn new(config: &'a Config, client: C) -> Result<Self> {
        Ok(Self {
            config,
            client,
            fetcher: Fetcher::new()?,
        })
    }

    /// Generation client in use.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Run every step for `request`.
    pub async fn run(&self, request: &ExampleRequest) -> Result<SynthesisReport> {
        let urls = if request.urls.is_empty() {
            let default = self.config.generator.default_doc_url.clone();
            info!("No URLs provided, using default URL: {default}");
            vec![default]
        } else {
            request.urls.clone()
        };

        let number = next_example_number(&self.config.examples_dir())?;
        let folder = example_folder_name(number, &request.name);
        info!("Creating example in folder: {folder}");

        let mut documents = Vec::with_capacity(urls.len());
        for url in &urls {
            documents.push((url.clone(), self.fetcher.fetch_context(url).await));
        }
        let context = assemble_context(&documents);

        let guidelines = FormatGuidelines::load(&self.config.contributing_path());
        let template = TemplateExample::load(&self.config.template_example_dir());
        let prompt = build_prompt(&PromptParts {
            focus: &request.focus,
            theme: &request.theme,
            context: &context,
            guidelines: &guidelines,
            template: &template,
        });

        let generated = self.client.generate(&prompt).await?;
        self.persist(request, folder, urls, &generated)
    }

    fn persist(
        &self,
        request: &ExampleRequest,
        folder: String,
        urls: Vec<String>,
        generated: &GeneratedExample,
    ) -> Result<SynthesisReport> {
        let example_dir = self.config.examples_dir().join(&folder);
        let files = write_example_files(&example_dir, &request.name, generated, &urls)?;

        let heading = PageHeading::from_code(&generated.python_code, &request.name);
        let section = classify_focus(&request.focus).to_string();
        let section_dir = self.config.docs_dir().join(section_dir_name(&section));
        std::fs::create_dir_all(&section_dir).map_err(|e| Error::io_at(&section_dir, e))?;
        let page = section_dir.join(format!("{}.md", request.name));
        std::fs::write(&page, render_page(&heading, generated)).map_err(|e| Error::io_at(&page, e))?;

        let nav = self.update_nav(&section, &heading.title, &request.name);

        let image_dir = if generated.requires_image {
            let dir = section_dir.join("images");
            std::fs::create_dir_all(&dir).map_err(|e| Error::io_at(&dir, e))?;
            Some(dir)
        } else {
            None
        };

        Ok(SynthesisReport {
            folder,
            example_dir,
            files,
            heading,
            section,
            page,
            nav,
            image_dir,
            urls,
        })
    }

    fn update_nav(&self, section: &str, title: &str, name: &str) -> NavUpdate {
        let path = self.config.site_config_path();
        let nav_path = format!("{}/{name}.md", section_dir_name(section));
        let result = SiteManifest::load(&path).and_then(|mut manifest| {
            let outcome = manifest.insert_page(section, title, &nav_path);
            if matches!(outcome, NavInsert::Inserted { .. }) {
                manifest.save(&path)?;
            }
            Ok(outcome)
        });
        match result {
            Ok(NavInsert::Inserted { position }) => NavUpdate::Inserted { position },
            Ok(NavInsert::SectionMissing) => {
                warn!("Section '{section}' not found in {}; navigation not updated", path.display());
                NavUpdate::SectionMissing
            },
            Err(e) => {
                warn!("Error updating {}: {e}", path.display());
                NavUpdate::Failed(e.to_string())
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::nav::NavNode;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct CannedClient {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedClient {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationClient for CannedClient {
        async fn generate(&self, prompt: &str) -> Result<GeneratedExample> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            parse_generated(&self.reply)
        }
    }

    fn project() -> (TempDir, Config) {
        let tmp = TempDir::new().unwrap();
        let config = Config::with_root(tmp.path());
        fs::create_dir_all(config.examples_dir().join("001-hello")).unwrap();
        fs::create_dir_all(config.examples_dir().join("002-streaming-text")).unwrap();
        fs::write(
            config.template_example_dir().join("streaming-text.py"),
            "# Streaming text",
        )
        .unwrap();
        SiteManifest::new(
            &SiteConfig::default(),
            vec![
                NavNode::page("Home", "index.md"),
                NavNode::section(
                    "Text",
                    vec![
                        NavNode::page("Overview", "text/index.md"),
                        NavNode::page("Hello", "text/hello.md"),
                    ],
                ),
            ],
        )
        .save(&config.site_config_path())
        .unwrap();
        (tmp, config)
    }

    fn request(focus: &str) -> ExampleRequest {
        ExampleRequest {
            name: "multi-chat".to_string(),
            focus: focus.to_string(),
            theme: "astronomy".to_string(),
            // Rejected before any network I/O; degrades to empty context.
            urls: vec!["not-a-url".to_string()],
        }
    }

    const REPLY: &str = r##"{"python_code": "# Multi-turn chat\n# Chat about the stars\n\nprint(1)", "shell_code": "$ python multi-chat.py", "requests_code": null, "requires_image": true}"##;

    #[tokio::test]
    async fn test_run_writes_example_page_and_nav() {
        let (_tmp, config) = project();
        let synth = Synthesizer::new(&config, CannedClient::new(REPLY)).unwrap();

        let report = synth.run(&request("multi-turn chat")).await.unwrap();

        assert_eq!(report.folder, "003-multi-chat");
        assert_eq!(report.section, "Text");
        assert!(report.example_dir.join("multi-chat.py").exists());
        assert!(report.example_dir.join("multi-chat.sh").exists());
        assert!(!report.example_dir.join("multi-chat_requests.py").exists());
        assert_eq!(
            fs::read_to_string(report.example_dir.join("multi-chat_links.txt")).unwrap(),
            "not-a-url"
        );

        let page = fs::read_to_string(config.docs_dir().join("text/multi-chat.md")).unwrap();
        assert!(page.starts_with("# Multi-turn chat\n\nChat about the stars\n\n## Example Code"));

        assert_eq!(report.nav, NavUpdate::Inserted { position: 1 });
        let manifest = SiteManifest::load(&config.site_config_path()).unwrap();
        let entries = manifest.section_entries("Text").unwrap();
        assert_eq!(
            entries[1].get("Multi-turn chat").and_then(|v| v.as_str()),
            Some("text/multi-chat.md")
        );

        assert_eq!(report.image_dir, Some(config.docs_dir().join("text/images")));
        assert!(config.docs_dir().join("text/images").is_dir());
        assert_eq!(report.image_file_name().as_deref(), Some("multi-chat.png"));

        let prompts = synth.client().prompts.lock().unwrap();
        assert!(prompts[0].contains("astronomy"));
        assert!(prompts[0].contains("# Streaming text"));
    }

    #[tokio::test]
    async fn test_missing_section_keeps_files_and_manifest() {
        let (_tmp, config) = project();
        let before = fs::read_to_string(config.site_config_path()).unwrap();
        let synth = Synthesizer::new(&config, CannedClient::new(REPLY)).unwrap();

        let report = synth.run(&request("video summaries")).await.unwrap();

        assert_eq!(report.section, "Video");
        assert_eq!(report.nav, NavUpdate::SectionMissing);
        assert!(config.docs_dir().join("video/multi-chat.md").exists());
        assert_eq!(fs::read_to_string(config.site_config_path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_tagged_manifest_is_left_untouched() {
        let (_tmp, config) = project();
        let tagged = "site_name: Test\nmarkdown_extensions:\n  - pymdownx.emoji:\n      emoji_index: !!python/name:material.extensions.emoji.twemoji\nnav:\n  - Text:\n      - Overview: text/index.md\n";
        fs::write(config.site_config_path(), tagged).unwrap();
        let synth = Synthesizer::new(&config, CannedClient::new(REPLY)).unwrap();

        let report = synth.run(&request("multi-turn chat")).await.unwrap();

        assert!(matches!(report.nav, NavUpdate::Failed(ref reason) if reason.contains("YAML tags")));
        assert!(config.docs_dir().join("text/multi-chat.md").exists());
        assert_eq!(fs::read_to_string(config.site_config_path()).unwrap(), tagged);
    }

    #[tokio::test]
    async fn test_schema_mismatch_writes_nothing() {
        let (_tmp, config) = project();
        let synth = Synthesizer::new(
            &config,
            CannedClient::new(r##"{"python_code": "# Missing fields"}"##),
        )
        .unwrap();

        let err = synth.run(&request("streaming")).await.unwrap_err();
        assert_eq!(err.category(), "schema");
        assert!(!config.examples_dir().join("003-multi-chat").exists());
        assert!(!config.docs_dir().exists());
    }

    #[tokio::test]
    async fn test_empty_url_list_uses_default() {
        let (_tmp, mut config) = project();
        config.generator.default_doc_url = "also-not-a-url".to_string();
        let synth = Synthesizer::new(&config, CannedClient::new(REPLY)).unwrap();
        let mut req = request("chat");
        req.urls.clear();

        let report = synth.run(&req).await.unwrap();
        assert_eq!(report.urls, vec!["also-not-a-url".to_string()]);
    }

    #[test]
    fn test_preflight_requires_manifest() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::with_root(tmp.path());
        config.generator.api_key_env = "PATH".to_string();
        let err = preflight(&config).unwrap_err();
        assert_eq!(err.category(), "not_found");
    }
}
