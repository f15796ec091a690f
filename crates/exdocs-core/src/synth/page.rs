//! Files written for a generated example: sources, sidecar links and the
//! documentation page.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::slug::title_from_slug;
use crate::types::GeneratedExample;
use crate::{Error, Result};

/// `# Title` on the first line of a program.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^# (.+)$").unwrap());

/// Source files written into the example directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFiles {
    /// Example program.
    pub python: PathBuf,
    /// Shell transcript.
    pub shell: PathBuf,
    /// Request-replication program, when one was generated.
    pub requests: Option<PathBuf>,
    /// Sidecar listing the documentation URLs.
    pub links: PathBuf,
}

/// Write the generated sources into `example_dir`, creating it.
///
/// Files are named after `name`. A failure partway leaves earlier files in
/// place.
pub fn write_example_files(
    example_dir: &Path,
    name: &str,
    generated: &GeneratedExample,
    urls: &[String],
) -> Result<ExampleFiles> {
    std::fs::create_dir_all(example_dir).map_err(|e| Error::io_at(example_dir, e))?;

    let python = write(example_dir.join(format!("{name}.py")), &generated.python_code)?;
    let shell = write(example_dir.join(format!("{name}.sh")), &generated.shell_code)?;
    let requests = match generated.requests_code.as_deref() {
        Some(code) if !code.is_empty() => {
            Some(write(example_dir.join(format!("{name}_requests.py")), code)?)
        },
        _ => None,
    };
    let links = write(example_dir.join(format!("{name}_links.txt")), &urls.join("\n"))?;

    Ok(ExampleFiles {
        python,
        shell,
        requests,
        links,
    })
}

fn write(path: PathBuf, contents: &str) -> Result<PathBuf> {
    std::fs::write(&path, contents).map_err(|e| Error::io_at(&path, e))?;
    Ok(path)
}

/// Title and description of a generated program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeading {
    /// Page title.
    pub title: String,
    /// Leading prose shown under the title.
    pub description: String,
}

impl PageHeading {
    /// Read the heading from the program's leading comment lines.
    ///
    /// Line one `# <title>` gives the title. When that matched and line two
    /// is also a `# ` comment, the description starts there and runs until
    /// the first blank line or the next line starting with `#`. Missing
    /// parts fall back to text derived from `name`.
    ///
    /// ```rust
    /// use exdocs_core::synth::PageHeading;
    ///
    /// let heading = PageHeading::from_code("# Streaming text\n# Print tokens as they arrive\nimport os", "streaming");
    /// assert_eq!(heading.title, "Streaming text");
    /// assert_eq!(heading.description, "Print tokens as they arrive");
    /// ```
    #[must_use]
    pub fn from_code(code: &str, name: &str) -> Self {
        let mut lines = code.lines();
        let matched = lines
            .next()
            .and_then(|first| TITLE_RE.captures(first))
            .map(|caps| caps[1].trim().to_string());
        let has_title = matched.is_some();
        let title = matched
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| title_from_slug(name));

        let description = lines
            .next()
            .filter(|_| has_title)
            .and_then(|second| second.strip_prefix("# "))
            .map(|first| {
                let mut kept = vec![first];
                kept.extend(
                    code.lines()
                        .skip(2)
                        .take_while(|l| !l.trim().is_empty() && !l.trim().starts_with('#')),
                );
                kept.join("\n").trim().to_string()
            })
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("An example showing {}.", title_from_slug(name).to_lowercase()));

        Self { title, description }
    }
}

/// Render the documentation page for a generated example.
#[must_use]
pub fn render_page(heading: &PageHeading, generated: &GeneratedExample) -> String {
    let mut page = format!("# {}\n\n", heading.title);
    if !heading.description.is_empty() {
        page.push_str(&heading.description);
        page.push_str("\n\n");
    }
    page.push_str("## Example Code\n\n");
    page.push_str(&format!("```python\n{}\n```\n\n", generated.python_code));
    page.push_str("## Running the Example\n\n");
    page.push_str(&format!("```sh\n{}\n```\n\n", generated.shell_code));
    page
}
