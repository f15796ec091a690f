//! Navigation manifest for the static-site generator.
//!
//! The manifest is a YAML document with the site settings plus a `nav` tree
//! of single-key mappings (`{title: path}` for pages, `{title: [...]}` for
//! sections). The converter builds it from scratch; the synthesizer loads an
//! existing one and inserts a single page.
//!
//! ```rust
//! use exdocs_core::nav::{NavNode, SiteManifest};
//! use exdocs_core::config::SiteConfig;
//!
//! let nav = vec![
//!     NavNode::page("Home", "index.md"),
//!     NavNode::section("Text", vec![NavNode::page("Overview", "text/index.md")]),
//! ];
//! let yaml = SiteManifest::new(&SiteConfig::default(), nav).to_yaml().unwrap();
//! assert!(yaml.contains("nav:\n  - Home: index.md\n  - Text:\n      - Overview: text/index.md\n"));
//! ```

pub mod emit;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::config::SiteConfig;
use crate::{Error, Result};

pub use emit::to_yaml_string;

/// Title of the entry that points at a section's own index page.
pub const OVERVIEW_TITLE: &str = "Overview";

/// Theme features enabled on every generated site.
pub const THEME_FEATURES: &[&str] = &[
    "content.code.copy",
    "navigation.instant",
    "navigation.tracking",
    "navigation.indexes",
    "navigation.top",
];

/// Markdown extensions enabled on every generated site.
pub const MARKDOWN_EXTENSIONS: &[&str] = &[
    "pymdownx.highlight",
    "pymdownx.superfences",
    "pymdownx.inlinehilite",
    "pymdownx.snippets",
    "admonition",
    "pymdownx.details",
    "attr_list",
    "md_in_html",
];

/// A YAML tag (`!foo`, `!!python/name:...`) in value position.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static YAML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^|[\s\[{,])!!?[A-Za-z<]").unwrap());

/// One entry in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    /// Leaf pointing at a Markdown file relative to the docs directory.
    Page {
        /// Title shown in the navigation.
        title: String,
        /// Relative path of the page.
        path: String,
    },
    /// Titled group of entries.
    Section {
        /// Title shown in the navigation.
        title: String,
        /// Entries in display order.
        children: Vec<NavNode>,
    },
}

impl NavNode {
    /// Page entry.
    pub fn page(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Page {
            title: title.into(),
            path: path.into(),
        }
    }

    /// Section entry.
    pub fn section(title: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Section {
            title: title.into(),
            children,
        }
    }

    /// Single-key mapping form used in the manifest.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Mapping::new();
        match self {
            Self::Page { title, path } => {
                map.insert(Value::from(title.as_str()), Value::from(path.as_str()));
            },
            Self::Section { title, children } => {
                let items = children.iter().map(Self::to_value).collect();
                map.insert(Value::from(title.as_str()), Value::Sequence(items));
            },
        }
        Value::Mapping(map)
    }
}

/// Complete manifest document: site settings plus navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteManifest {
    document: Value,
}

impl SiteManifest {
    /// Build a fresh manifest with the fixed theme, extensions and plugins.
    #[must_use]
    pub fn new(site: &SiteConfig, nav: Vec<NavNode>) -> Self {
        let strings = |items: &[&str]| {
            Value::Sequence(items.iter().map(|s| Value::from(*s)).collect())
        };

        let mut palette = Mapping::new();
        palette.insert("primary".into(), site.primary_color.as_str().into());
        palette.insert("accent".into(), site.accent_color.as_str().into());

        let mut theme = Mapping::new();
        theme.insert("name".into(), site.theme.as_str().into());
        theme.insert("palette".into(), Value::Mapping(palette));
        theme.insert("features".into(), strings(THEME_FEATURES));

        let mut doc = Mapping::new();
        doc.insert("site_name".into(), site.name.as_str().into());
        doc.insert("site_description".into(), site.description.as_str().into());
        doc.insert("theme".into(), Value::Mapping(theme));
        doc.insert("markdown_extensions".into(), strings(MARKDOWN_EXTENSIONS));
        doc.insert("plugins".into(), strings(&["search"]));
        doc.insert(
            "nav".into(),
            Value::Sequence(nav.iter().map(NavNode::to_value).collect()),
        );

        Self {
            document: Value::Mapping(doc),
        }
    }

    /// Load an existing manifest. A missing file is [`Error::NotFound`].
    ///
    /// Documents using YAML tags are refused with [`Error::Serialization`]:
    /// tags do not survive a rewrite, so saving such a manifest would
    /// silently change it.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
        if uses_tags(&raw) {
            return Err(Error::Serialization(format!(
                "{}: uses YAML tags that cannot be rewritten safely; edit it by hand",
                path.display()
            )));
        }
        let document: Value = serde_yaml::from_str(&raw)
            .map_err(|e| Error::Serialization(format!("{}: {e}", path.display())))?;
        if !document.is_mapping() {
            return Err(Error::Serialization(format!(
                "{}: expected a mapping at the top level",
                path.display()
            )));
        }
        Ok(Self { document })
    }

    /// Render as YAML with indented sequences and stable key order.
    pub fn to_yaml(&self) -> Result<String> {
        to_yaml_string(&self.document)
    }

    /// Write the manifest, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| Error::io_at(path, e))?;
        debug!("wrote navigation manifest to {}", path.display());
        Ok(())
    }

    /// Raw document.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    /// Titles of the top-level navigation entries, in order.
    #[must_use]
    pub fn nav_titles(&self) -> Vec<String> {
        self.nav()
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.as_mapping()?.keys().next()?.as_str().map(String::from))
            .collect()
    }

    fn nav(&self) -> Option<&Vec<Value>> {
        self.document.get("nav")?.as_sequence()
    }

    /// Entries listed under the top-level section `section`.
    #[must_use]
    pub fn section_entries(&self, section: &str) -> Option<&Vec<Value>> {
        self.nav()?
            .iter()
            .find_map(|entry| entry.as_mapping()?.get(section)?.as_sequence())
    }

    /// Insert a page into `section`, right after its Overview entry.
    ///
    /// Without an Overview entry the page goes to position 1 (or the end of
    /// a shorter list). When the section is not in the navigation the
    /// manifest is left untouched and [`NavInsert::SectionMissing`] is
    /// returned. Inserting the same page twice produces two entries.
    pub fn insert_page(&mut self, section: &str, title: &str, path: &str) -> NavInsert {
        let Some(entries) = self
            .document
            .get_mut("nav")
            .and_then(Value::as_sequence_mut)
            .and_then(|nav| {
                nav.iter_mut().find_map(|entry| {
                    entry.as_mapping_mut()?.get_mut(section)?.as_sequence_mut()
                })
            })
        else {
            return NavInsert::SectionMissing;
        };

        let position = entries
            .iter()
            .position(|item| {
                item.as_mapping()
                    .is_some_and(|m| m.contains_key(OVERVIEW_TITLE))
            })
            .map_or(1, |i| i + 1)
            .min(entries.len());

        let mut page = Mapping::new();
        page.insert(title.into(), path.into());
        entries.insert(position, Value::Mapping(page));
        NavInsert::Inserted { position }
    }
}

/// Whether `raw` carries a tag outside comments.
fn uses_tags(raw: &str) -> bool {
    raw.lines()
        .map(|line| line.split(" #").next().unwrap_or(line))
        .filter(|line| !line.trim_start().starts_with('#'))
        .any(|line| YAML_TAG_RE.is_match(line))
}

/// Outcome of [`SiteManifest::insert_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInsert {
    /// Page inserted at this index of the section's entry list.
    Inserted {
        /// Index of the new entry.
        position: usize,
    },
    /// The requested section is not present in the navigation.
    SectionMissing,
}
