//! Example-format guidance embedded in generation prompts.
//!
//! Two sources feed the prompt: fragments cut out of the contributing
//! guidelines, and the files of a reference example. Both are best-effort;
//! anything missing becomes an empty fragment.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::numbering::example_stem;

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static PYTHON_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)### 2\. Add Python File.*?```python(.*?)```").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static SHELL_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)### 3\. Add Shell Script.*?```sh(.*?)```").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static FORMATTING_RULES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)#### Formatting Rules:(.*?)###").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static SHELL_RULES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)#### Shell Script Format:(.*?)###").unwrap());

/// Format fragments from the contributing guidelines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatGuidelines {
    /// Skeleton of an example program.
    pub python_format: String,
    /// Skeleton of a shell transcript.
    pub shell_format: String,
    /// Rules for the example program.
    pub formatting_rules: String,
    /// Rules for the shell transcript.
    pub shell_rules: String,
}

impl FormatGuidelines {
    /// Cut the four fragments out of a guidelines document.
    ///
    /// A heading that is absent leaves its fragment empty.
    #[must_use]
    pub fn extract(text: &str) -> Self {
        let capture = |re: &Regex| {
            re.captures(text)
                .map(|caps| caps[1].to_string())
                .unwrap_or_default()
        };
        Self {
            python_format: capture(&PYTHON_FORMAT_RE),
            shell_format: capture(&SHELL_FORMAT_RE),
            formatting_rules: capture(&FORMATTING_RULES_RE),
            shell_rules: capture(&SHELL_RULES_RE),
        }
    }

    /// Read and extract from `path`; an unreadable file yields empty fragments.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::extract(&text),
            Err(e) => {
                warn!("Could not read guidelines at {}: {e}", path.display());
                Self::default()
            },
        }
    }
}

/// Files of the reference example shown to the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateExample {
    /// Example program.
    pub python: String,
    /// Shell transcript.
    pub shell: String,
    /// Request-replication program.
    pub requests: String,
}

impl TemplateExample {
    /// Load `<stem>.py`, `<stem>.sh` and `<stem>_requests.py` from `dir`.
    ///
    /// `stem` is the directory name without its numeric prefix. Missing files
    /// are logged and left empty.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        let stem = dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(example_stem)
            .unwrap_or_default();
        let read = |file: String| {
            let path = dir.join(file);
            std::fs::read_to_string(&path).unwrap_or_else(|e| {
                warn!("Template file {} unavailable: {e}", path.display());
                String::new()
            })
        };
        Self {
            python: read(format!("{stem}.py")),
            shell: read(format!("{stem}.sh")),
            requests: read(format!("{stem}_requests.py")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CONTRIBUTING: &str = r#"# Contributing

### 1. Pick a number

### 2. Add Python File

Create `examples/NNN-name/name.py`:

```python
# Title
# Description
from google import genai
```

#### Formatting Rules:
- First line is the title
- Second line is the description

### 3. Add Shell Script

```sh
# Run the example
$ python name.py
```

#### Shell Script Format:
- Prefix commands with `$`

### 4. Open a PR
"#;

    #[test]
    fn test_extracts_all_fragments() {
        let g = FormatGuidelines::extract(CONTRIBUTING);
        assert!(g.python_format.contains("from google import genai"));
        assert!(g.shell_format.contains("$ python name.py"));
        assert!(g.formatting_rules.contains("First line is the title"));
        assert!(!g.formatting_rules.contains("Add Shell Script"));
        assert!(g.shell_rules.contains("Prefix commands"));
    }

    #[test]
    fn test_missing_headings_yield_empty_fragments() {
        let g = FormatGuidelines::extract("### 2. Add Python File\n\nno code block here\n");
        assert_eq!(g, FormatGuidelines::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let g = FormatGuidelines::load(&tmp.path().join("CONTRIBUTING.md"));
        assert_eq!(g, FormatGuidelines::default());
    }

    #[test]
    fn test_template_example_reads_stem_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("002-streaming-text");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("streaming-text.py"), "# Streaming text").unwrap();
        fs::write(dir.join("streaming-text.sh"), "$ python streaming-text.py").unwrap();

        let template = TemplateExample::load(&dir);
        assert_eq!(template.python, "# Streaming text");
        assert_eq!(template.shell, "$ python streaming-text.py");
        assert!(template.requests.is_empty());
    }
}
