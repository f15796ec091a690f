//! Generation prompt assembly.

use std::fmt::Write as _;

use super::guidelines::{FormatGuidelines, TemplateExample};

/// Join fetched documents into one context block.
///
/// Documents with empty text are skipped; each kept one is introduced by a
/// marker line naming its URL.
///
/// ```rust
/// use exdocs_core::synth::assemble_context;
///
/// let docs = vec![
///     ("https://a.example".to_string(), "Alpha".to_string()),
///     ("https://b.example".to_string(), String::new()),
/// ];
/// assert_eq!(
///     assemble_context(&docs),
///     "\n\n--- Content from https://a.example ---\n\nAlpha"
/// );
/// ```
#[must_use]
pub fn assemble_context(documents: &[(String, String)]) -> String {
    let mut context = String::new();
    for (url, text) in documents {
        if text.is_empty() {
            continue;
        }
        let _ = write!(context, "\n\n--- Content from {url} ---\n\n{text}");
    }
    context
}

/// Everything the prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct PromptParts<'a> {
    /// What the example must demonstrate.
    pub focus: &'a str,
    /// Optional topical theme; empty means none.
    pub theme: &'a str,
    /// Output of [`assemble_context`].
    pub context: &'a str,
    /// Format fragments from the contributing guidelines.
    pub guidelines: &'a FormatGuidelines,
    /// Reference example files.
    pub template: &'a TemplateExample,
}

/// Render the full instruction text sent to the generator.
#[must_use]
pub fn build_prompt(parts: &PromptParts<'_>) -> String {
    let PromptParts {
        focus,
        theme,
        context,
        guidelines,
        template,
    } = *parts;
    let theme = theme.trim();

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You write short, runnable code examples that teach developers how to use the Google Gemini API.\n\
         Turn the documentation below into one small illustrative example.\n"
    );
    let _ = writeln!(prompt, "## Focus\nThe example must demonstrate: {focus}\n");
    if !theme.is_empty() {
        let _ = writeln!(prompt, "## Theme\nUse this topical theme throughout: {theme}\n");
    }
    let _ = writeln!(prompt, "## Documentation{context}\n");

    let _ = writeln!(
        prompt,
        "## Output\n\
         Return four fields:\n\
         - python_code: the example program, following the Python format below\n\
         - shell_code: a transcript that runs the program, with sample output, following the shell format below\n\
         - requests_code: a port of any curl examples from the documentation using the requests library; leave it out when the documentation has no curl examples\n\
         - requires_image: true when the output is an image (generation or editing) that should be shown on the page\n"
    );
    let _ = writeln!(prompt, "### Python format\n{}\n", guidelines.python_format);
    let _ = writeln!(prompt, "Python rules:\n{}\n", guidelines.formatting_rules);
    let _ = writeln!(prompt, "### Shell format\n{}\n", guidelines.shell_format);
    let _ = writeln!(prompt, "Shell rules:\n{}\n", guidelines.shell_rules);

    let _ = writeln!(prompt, "## Reference example");
    let _ = writeln!(prompt, "Python:\n\n```python\n{}\n```\n", template.python);
    let _ = writeln!(prompt, "Shell:\n\n```sh\n{}\n```\n", template.shell);
    let _ = writeln!(prompt, "Requests:\n\n```python\n{}\n```\n", template.requests);

    let _ = writeln!(
        prompt,
        "Keep the example concise and centred on {focus}; skip parts of the documentation that are unrelated. \
         The first line of python_code is a `# ` comment holding a very short title (for example \"Streaming text\" or \"Object detection\"), \
         and the second line is a `# ` comment with a one-sentence description."
    );
    if !theme.is_empty() {
        let _ = writeln!(
            prompt,
            "Work the theme ({theme}) into prompts, variable names and sample text where it fits."
        );
    }
    prompt
}
