//! Legacy JSON catalog to Markdown tree plus navigation manifest.
//!
//! Conversion is a single pass over the catalog that overwrites whatever it
//! writes and never deletes anything:
//!
//! ```text
//! docs/index.md
//! docs/<section-slug>/index.md
//! docs/<section-slug>/<example-slug>.md
//! docs/<section-slug>/images/<file>
//! mkdocs.yml
//! ```
//!
//! Examples whose `section_id` matches no section are not rendered.

mod render;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use render::{
    CopiedImage, RUNNING_HEADING, join_parts, render_code_segments, render_example_page,
    render_images, render_links, render_main_index, render_section_index, render_shell_segments,
};

use crate::config::Config;
use crate::nav::{NavNode, OVERVIEW_TITLE, SiteManifest};
use crate::slug::slugify;
use crate::types::{Catalog, Example};
use crate::{Error, Result};

/// Counts for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Sections rendered.
    pub sections: usize,
    /// Example pages written.
    pub pages: usize,
    /// Images copied.
    pub images: usize,
    /// Image references whose source file was missing.
    pub images_skipped: usize,
    /// Examples dropped because their section does not exist.
    pub orphans: usize,
    /// Markdown output directory.
    pub docs_dir: PathBuf,
    /// Manifest written.
    pub manifest: PathBuf,
}

/// Per-example counts shown by [`CatalogSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSummary {
    /// Example id.
    pub id: String,
    /// Example title.
    pub title: String,
    /// Number of code segments.
    pub code_segments: usize,
    /// Number of shell segments.
    pub shell_segments: usize,
    /// Number of image references.
    pub images: usize,
}

/// Per-section count shown by [`CatalogSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    /// Section id.
    pub id: String,
    /// Section title.
    pub title: String,
    /// Examples that reference this section.
    pub examples: usize,
}

/// Read-only overview of a catalog, used to check data before converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    /// Total examples, including orphans.
    pub examples: usize,
    /// Total sections.
    pub sections: usize,
    /// Sections in navigation order.
    pub per_section: Vec<SectionSummary>,
    /// Title of the first section in navigation order.
    pub first_section: Option<String>,
    /// Examples of the first section, in order.
    pub first_section_examples: Vec<ExampleSummary>,
}

impl CatalogSummary {
    /// Summarize `catalog`.
    #[must_use]
    pub fn of(catalog: &Catalog) -> Self {
        let ordered = catalog.ordered_sections();
        let per_section = ordered
            .iter()
            .map(|s| SectionSummary {
                id: s.id.clone(),
                title: s.title.clone(),
                examples: catalog.examples_in(s).count(),
            })
            .collect();
        let first = ordered.first().copied();
        let first_section_examples = first
            .map(|s| {
                catalog
                    .ordered_examples_in(s)
                    .into_iter()
                    .map(|e| ExampleSummary {
                        id: e.id.clone(),
                        title: e.title.clone(),
                        code_segments: e.code_segments.len(),
                        shell_segments: e.shell_segments.len(),
                        images: e.image_data.len(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            examples: catalog.examples.len(),
            sections: catalog.sections.len(),
            per_section,
            first_section: first.map(|s| s.title.clone()),
            first_section_examples,
        }
    }
}

/// Navigation tree for a catalog: Home, then each section with its Overview
/// and its examples in order.
#[must_use]
pub fn build_nav(catalog: &Catalog) -> Vec<NavNode> {
    let mut nav = vec![NavNode::page("Home", "index.md")];
    for section in catalog.ordered_sections() {
        let slug = slugify(&section.title);
        let mut children = vec![NavNode::page(OVERVIEW_TITLE, format!("{slug}/index.md"))];
        children.extend(catalog.ordered_examples_in(section).into_iter().map(|e| {
            NavNode::page(e.title.clone(), format!("{slug}/{}.md", slugify(&e.title)))
        }));
        nav.push(NavNode::section(section.title.clone(), children));
    }
    nav
}

/// Converts the legacy catalog of one project.
pub struct Converter<'a> {
    config: &'a Config,
}

impl<'a> Converter<'a> {
    /// Converter for the project described by `config`.
    #[must_use]
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Load the catalog from the configured data directory.
    pub fn load_catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.config.data_dir())
    }

    /// Load the catalog and summarize it without writing anything.
    pub fn inspect(&self) -> Result<CatalogSummary> {
        Ok(CatalogSummary::of(&self.load_catalog()?))
    }

    /// Load the catalog and write the full output tree.
    pub fn convert(&self) -> Result<ConversionReport> {
        let catalog = self.load_catalog()?;
        self.convert_catalog(&catalog)
    }

    /// Write the output tree for an already loaded catalog.
    pub fn convert_catalog(&self, catalog: &Catalog) -> Result<ConversionReport> {
        let docs_dir = self.config.docs_dir();
        let site = &self.config.site;
        create_dir(&docs_dir)?;
        write_file(&docs_dir.join("index.md"), &render_main_index(catalog, site))?;

        let mut report = ConversionReport {
            docs_dir: docs_dir.clone(),
            manifest: self.config.site_config_path(),
            ..ConversionReport::default()
        };

        for section in &catalog.sections {
            let section_dir = docs_dir.join(slugify(&section.title));
            create_dir(&section_dir)?;
            write_file(
                &section_dir.join("index.md"),
                &render_section_index(section, catalog),
            )?;
            report.sections += 1;

            for example in catalog.examples_in(section) {
                let (images, skipped) = self.copy_images(example, &section_dir)?;
                report.images += images.len();
                report.images_skipped += skipped;

                let page = section_dir.join(format!("{}.md", slugify(&example.title)));
                write_file(&page, &render_example_page(example, &images, site))?;
                report.pages += 1;
            }
        }

        report.orphans = catalog
            .examples
            .iter()
            .filter(|e| !catalog.sections.iter().any(|s| s.id == e.section_id))
            .count();
        if report.orphans > 0 {
            debug!("{} examples reference unknown sections", report.orphans);
        }

        SiteManifest::new(site, build_nav(catalog)).save(&report.manifest)?;
        info!(
            "Converted {} sections and {} pages into {}",
            report.sections,
            report.pages,
            docs_dir.display()
        );
        Ok(report)
    }

    /// Copy the example's images into `section_dir/images`.
    ///
    /// Sources are resolved against the project root. Missing sources are
    /// skipped and counted.
    fn copy_images(&self, example: &Example, section_dir: &Path) -> Result<(Vec<CopiedImage>, usize)> {
        if example.image_data.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let images_dir = section_dir.join("images");
        create_dir(&images_dir)?;

        let mut copied = Vec::new();
        let mut skipped = 0;
        for image in &example.image_data {
            let source = self.config.resolve(Path::new(&image.path));
            if !source.is_file() {
                debug!("image source {} missing, skipping", source.display());
                skipped += 1;
                continue;
            }
            let target = images_dir.join(&image.filename);
            std::fs::copy(&source, &target).map_err(|e| Error::io_at(&target, e))?;
            copied.push(CopiedImage {
                filename: image.filename.clone(),
                caption: image.caption.clone().unwrap_or_default(),
            });
        }
        Ok((copied, skipped))
    }
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::io_at(path, e))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::io_at(path, e))
}
