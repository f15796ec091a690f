//! Core data types shared by the converter and the synthesizer.
//!
//! The legacy data lives in two JSON documents, `{"sections": [...]}` and
//! `{"examples": [...]}`. Both are read-only inputs: nothing in this crate
//! mutates a [`Section`] or an [`Example`] after loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level category grouping multiple examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Identifier referenced by [`Example::section_id`].
    pub id: String,
    /// Display title; also the source of the section slug.
    pub title: String,
    /// Prose shown under the section heading.
    #[serde(default)]
    pub description: String,
    /// Navigation placement key. Not required to be unique or contiguous.
    #[serde(default)]
    pub order: i64,
}

/// One illustrated code walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Stable identifier.
    pub id: String,
    /// Foreign key into the section collection.
    pub section_id: String,
    /// Display title; also the source of the page slug.
    pub title: String,
    /// Prose shown under the page title.
    #[serde(default)]
    pub description: String,
    /// Placement within the section.
    #[serde(default)]
    pub order: i64,
    /// Prose-plus-code units, in reading order.
    #[serde(default)]
    pub code_segments: Vec<CodeSegment>,
    /// Command-plus-output units, in reading order.
    #[serde(default)]
    pub shell_segments: Vec<ShellSegment>,
    /// Images illustrating the example.
    #[serde(default)]
    pub image_data: Vec<ImageRef>,
    /// External documentation links.
    #[serde(default)]
    pub documentation_links: Vec<String>,
}

/// Prose-plus-code unit. Either part may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSegment {
    /// Explanatory prose.
    #[serde(default)]
    pub annotation: Option<String>,
    /// Code shown to the reader.
    #[serde(default)]
    pub display_code: Option<String>,
}

/// Command-plus-output unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellSegment {
    /// Prose shown before the command.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Command line, rendered after a `$ ` prompt.
    #[serde(default)]
    pub command: String,
    /// Recorded output.
    #[serde(default)]
    pub output: String,
}

/// Reference to an image stored alongside the legacy example sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Source path, relative to the project root.
    pub path: String,
    /// File name used in the rendered output.
    pub filename: String,
    /// Optional caption.
    #[serde(default)]
    pub caption: Option<String>,
}

/// Structured result of a generation request.
///
/// This is a strict contract: `python_code`, `shell_code` and
/// `requires_image` must be present, `requests_code` may be omitted or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedExample {
    /// Annotated example program.
    pub python_code: String,
    /// Shell transcript running the program, with sample output.
    pub shell_code: String,
    /// Request-replication code, only when the source docs contain curl calls.
    #[serde(default)]
    pub requests_code: Option<String>,
    /// Whether the example needs an illustrative image.
    pub requires_image: bool,
}

#[derive(Debug, Deserialize)]
struct SectionsDocument {
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct ExamplesDocument {
    examples: Vec<Example>,
}

/// Both legacy collections, loaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Sections in input order.
    pub sections: Vec<Section>,
    /// Examples in input order.
    pub examples: Vec<Example>,
}

impl Catalog {
    /// Load `sections.json` and `examples.json` from `data_dir`.
    ///
    /// A missing document is fatal and reported as [`Error::NotFound`].
    pub fn load(data_dir: &Path) -> Result<Self> {
        let sections: SectionsDocument = read_json(&data_dir.join("sections.json"))?;
        let examples: ExamplesDocument = read_json(&data_dir.join("examples.json"))?;
        Ok(Self {
            sections: sections.sections,
            examples: examples.examples,
        })
    }

    /// Sections sorted by `order`; ties keep input order.
    #[must_use]
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Examples belonging to `section`, in input order.
    pub fn examples_in<'a>(&'a self, section: &'a Section) -> impl Iterator<Item = &'a Example> {
        self.examples
            .iter()
            .filter(move |e| e.section_id == section.id)
    }

    /// Examples belonging to `section`, sorted by `order`; ties keep input order.
    #[must_use]
    pub fn ordered_examples_in<'a>(&'a self, section: &'a Section) -> Vec<&'a Example> {
        let mut examples: Vec<&Example> = self.examples_in(section).collect();
        examples.sort_by_key(|e| e.order);
        examples
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
    serde_json::from_str(&raw)
        .map_err(|e| Error::Serialization(format!("{}: {e}", path.display())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_catalog(dir: &Path, sections: &str, examples: &str) {
        fs::write(dir.join("sections.json"), sections).unwrap();
        fs::write(dir.join("examples.json"), examples).unwrap();
    }

    #[test]
    fn test_load_tolerates_missing_optional_fields() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            tmp.path(),
            r#"{"sections": [{"id": "s1", "title": "Text"}]}"#,
            r#"{"examples": [{"id": "e1", "section_id": "s1", "title": "Hello",
                "code_segments": [{"annotation": "Say hi"}, {"display_code": "print(1)"}],
                "unknown_field": true}]}"#,
        );

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.sections.len(), 1);
        assert_eq!(catalog.sections[0].order, 0);
        let example = &catalog.examples[0];
        assert_eq!(example.code_segments.len(), 2);
        assert!(example.shell_segments.is_empty());
        assert!(example.documentation_links.is_empty());
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("sections.json"), r#"{"sections": []}"#).unwrap();

        let err = Catalog::load(tmp.path()).unwrap_err();
        assert_eq!(err.category(), "not_found");
        assert!(err.to_string().contains("examples.json"));
    }

    #[test]
    fn test_ordering_is_stable_for_ties() {
        let section = |id: &str, order| Section {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            order,
        };
        let catalog = Catalog {
            sections: vec![section("b", 2), section("a", 1), section("c", 1)],
            examples: vec![],
        };
        let ids: Vec<&str> = catalog
            .ordered_sections()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }

    #[test]
    fn test_examples_ordered_within_section() {
        let example = |id: &str, section_id: &str, order| Example {
            id: id.to_string(),
            section_id: section_id.to_string(),
            title: id.to_string(),
            description: String::new(),
            order,
            code_segments: vec![],
            shell_segments: vec![],
            image_data: vec![],
            documentation_links: vec![],
        };
        let catalog = Catalog {
            sections: vec![],
            examples: vec![
                example("late", "text", 3),
                example("other", "images", 1),
                example("early", "text", 1),
                example("tied", "text", 3),
            ],
        };
        let section = Section {
            id: "text".to_string(),
            title: "Text".to_string(),
            description: String::new(),
            order: 1,
        };
        let ids: Vec<&str> = catalog
            .ordered_examples_in(&section)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["early", "late", "tied"]);
    }

    #[test]
    fn test_generated_example_requires_core_fields() {
        let ok: GeneratedExample = serde_json::from_str(
            r##"{"python_code": "# T", "shell_code": "$ python t.py", "requires_image": false}"##,
        )
        .unwrap();
        assert!(ok.requests_code.is_none());

        let missing = serde_json::from_str::<GeneratedExample>(
            r##"{"python_code": "# T", "requires_image": false}"##,
        );
        assert!(missing.is_err());
    }
}
