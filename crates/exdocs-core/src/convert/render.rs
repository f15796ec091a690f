//! Markdown rendering for converted pages.
//!
//! Every renderer returns a list of top-level parts; a page is its parts
//! joined by one blank line.

use crate::config::SiteConfig;
use crate::slug::slugify;
use crate::types::{Catalog, CodeSegment, Example, Section, ShellSegment};

/// Heading introducing the shell transcript.
pub const RUNNING_HEADING: &str = "## Running the Example";

/// Image that was copied next to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedImage {
    /// File name inside the `images/` directory.
    pub filename: String,
    /// Caption; empty when the source had none.
    pub caption: String,
}

/// Join parts into a page with a trailing newline.
#[must_use]
pub fn join_parts(parts: &[String]) -> String {
    let mut page = parts.join("\n\n");
    page.push('\n');
    page
}

/// Interleave annotations and code blocks.
///
/// Consecutive annotations merge into one paragraph that is emitted right
/// before the next code block. Prose left over at the end is emitted last.
/// Segments with neither part are ignored.
#[must_use]
pub fn render_code_segments(segments: &[CodeSegment], language: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut pending = String::new();

    for segment in segments {
        let annotation = segment.annotation.as_deref().unwrap_or_default();
        let code = segment.display_code.as_deref().unwrap_or_default().trim();
        if annotation.is_empty() && code.is_empty() {
            continue;
        }

        if !annotation.is_empty() {
            if !pending.is_empty() {
                pending.push_str("\n\n");
            }
            pending.push_str(annotation);
        }

        if !code.is_empty() {
            if !pending.is_empty() {
                parts.push(std::mem::take(&mut pending));
            }
            parts.push(format!("```{language}\n{code}\n```"));
        }
    }

    if !pending.is_empty() {
        parts.push(pending);
    }
    parts
}

/// Heading plus one explanation/transcript pair per segment.
///
/// Empty input renders nothing. A segment without a command contributes only
/// its explanation.
#[must_use]
pub fn render_shell_segments(segments: &[ShellSegment]) -> Vec<String> {
    if segments.is_empty() {
        return Vec::new();
    }

    let mut parts = vec![RUNNING_HEADING.to_string()];
    for segment in segments {
        if let Some(explanation) = segment.explanation.as_deref().filter(|e| !e.is_empty()) {
            parts.push(explanation.to_string());
        }
        if !segment.command.is_empty() {
            parts.push(format!("```sh\n$ {}\n{}\n```", segment.command, segment.output));
        }
    }
    parts
}

/// `## Images` section for the copied images.
#[must_use]
pub fn render_images(images: &[CopiedImage]) -> Vec<String> {
    if images.is_empty() {
        return Vec::new();
    }

    let mut parts = vec!["## Images".to_string()];
    parts.extend(images.iter().map(|image| {
        let suffix = if image.caption.is_empty() {
            String::new()
        } else {
            format!(" - {}", image.caption)
        };
        format!("![{}](images/{}){suffix}", image.caption, image.filename)
    }));
    parts
}

/// `## Further Information` section with numbered link labels.
#[must_use]
pub fn render_links(links: &[String], label: &str) -> Vec<String> {
    if links.is_empty() {
        return Vec::new();
    }

    let mut parts = vec!["## Further Information".to_string()];
    parts.extend(
        links
            .iter()
            .enumerate()
            .map(|(i, link)| format!("- [{label} {}]({link})", i + 1)),
    );
    parts
}

/// Full page for one example.
#[must_use]
pub fn render_example_page(example: &Example, images: &[CopiedImage], site: &SiteConfig) -> String {
    let mut parts = vec![format!("# {}", example.title)];
    if !example.description.is_empty() {
        parts.push(example.description.clone());
    }
    parts.extend(render_code_segments(&example.code_segments, &site.code_language));
    parts.extend(render_shell_segments(&example.shell_segments));
    parts.extend(render_images(images));
    parts.extend(render_links(&example.documentation_links, &site.link_label));
    join_parts(&parts)
}

/// Index page of a section listing its examples in order.
#[must_use]
pub fn render_section_index(section: &Section, catalog: &Catalog) -> String {
    let mut parts = vec![format!("# {}", section.title)];
    if !section.description.is_empty() {
        parts.push(section.description.clone());
    }
    parts.push("## Examples in this section".to_string());
    parts.extend(
        catalog
            .ordered_examples_in(section)
            .into_iter()
            .map(|e| format!("- [{}]({}.md)", e.title, slugify(&e.title))),
    );
    join_parts(&parts)
}

/// Landing page with a fixed introduction and one line per section.
#[must_use]
pub fn render_main_index(catalog: &Catalog, site: &SiteConfig) -> String {
    let mut parts = vec![
        format!("# {}", site.name),
        format!("{}.", site.description.trim_end_matches('.')),
        "## Overview".to_string(),
        "Each page walks through one short, runnable program. The site offers:".to_string(),
        [
            "- Commented examples that build from basic to advanced usage",
            "- Code and explanations side by side",
            "- Shell commands with their expected output",
            "- Examples grouped by topic",
            "- Images where the output is visual",
        ]
        .join("\n"),
        "## Sections".to_string(),
    ];
    parts.extend(catalog.ordered_sections().into_iter().map(|section| {
        let count = catalog.examples_in(section).count();
        format!(
            "- [{}]({}/index.md) - {count} examples",
            section.title,
            slugify(&section.title)
        )
    }));
    join_parts(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(annotation: Option<&str>, display: Option<&str>) -> CodeSegment {
        CodeSegment {
            annotation: annotation.map(str::to_string),
            display_code: display.map(str::to_string),
        }
    }

    #[test]
    fn test_annotations_merge_until_code() {
        let parts = render_code_segments(
            &[
                code(Some("First."), None),
                code(Some("Second."), None),
                code(None, Some("  print(1)\n")),
                code(None, None),
                code(Some(""), Some("   ")),
                code(Some("Trailing."), None),
            ],
            "python",
        );
        assert_eq!(
            parts,
            ["First.\n\nSecond.", "```python\nprint(1)\n```", "Trailing."]
        );
    }

    #[test]
    fn test_code_without_annotation() {
        let parts = render_code_segments(&[code(None, Some("a = 1")), code(Some("Note"), Some("b = 2"))], "python");
        assert_eq!(parts, ["```python\na = 1\n```", "Note", "```python\nb = 2\n```"]);
    }

    #[test]
    fn test_shell_segments() {
        assert!(render_shell_segments(&[]).is_empty());
        let parts = render_shell_segments(&[
            ShellSegment {
                explanation: Some("Run it:".to_string()),
                command: "python hello.py".to_string(),
                output: "Hello".to_string(),
            },
            ShellSegment {
                explanation: Some("No command here.".to_string()),
                command: String::new(),
                output: "ignored".to_string(),
            },
        ]);
        assert_eq!(
            parts,
            [
                RUNNING_HEADING,
                "Run it:",
                "```sh\n$ python hello.py\nHello\n```",
                "No command here."
            ]
        );
    }

    #[test]
    fn test_images_and_links() {
        let parts = render_images(&[
            CopiedImage {
                filename: "cat.png".to_string(),
                caption: "A cat".to_string(),
            },
            CopiedImage {
                filename: "dog.png".to_string(),
                caption: String::new(),
            },
        ]);
        assert_eq!(
            parts,
            ["## Images", "![A cat](images/cat.png) - A cat", "![](images/dog.png)"]
        );

        let links = render_links(&["https://a".to_string(), "https://b".to_string()], "Docs");
        assert_eq!(
            links,
            ["## Further Information", "- [Docs 1](https://a)", "- [Docs 2](https://b)"]
        );
    }

    #[test]
    fn test_example_page_order() {
        let example = Example {
            id: "e1".to_string(),
            section_id: "s1".to_string(),
            title: "Hello".to_string(),
            description: "Say hello.".to_string(),
            order: 1,
            code_segments: vec![code(Some("Import."), Some("import os"))],
            shell_segments: vec![ShellSegment {
                explanation: None,
                command: "python hello.py".to_string(),
                output: String::new(),
            }],
            image_data: vec![],
            documentation_links: vec!["https://docs".to_string()],
        };
        let page = render_example_page(&example, &[], &SiteConfig::default());
        assert_eq!(
            page,
            "# Hello\n\nSay hello.\n\nImport.\n\n```python\nimport os\n```\n\n## Running the Example\n\n```sh\n$ python hello.py\n\n```\n\n## Further Information\n\n- [Gemini docs link 1](https://docs)\n"
        );
    }
}
