//! Keyword-based placement of a generated example into a navigation section.

/// Section used when no keyword matches.
pub const FALLBACK_SECTION: &str = "Miscellaneous";

/// Ordered `(keyword, section)` table. Earlier rows win.
pub const SECTION_KEYWORDS: &[(&str, &str)] = &[
    ("text", "Text"),
    ("streaming", "Text"),
    ("chat", "Text"),
    ("system prompt", "Text"),
    ("reasoning", "Text"),
    ("structured output", "Text"),
    ("image", "Images"),
    ("vision", "Images"),
    ("bounding box", "Images"),
    ("segmentation", "Images"),
    ("audio", "Audio"),
    ("speech", "Audio"),
    ("transcription", "Audio"),
    ("video", "Video"),
    ("youtube", "Video"),
    ("pdf", "PDFs and other data types"),
    ("csv", "PDFs and other data types"),
    ("translation", "PDFs and other data types"),
    ("extract", "PDFs and other data types"),
    ("function", "Agentic behaviour"),
    ("tool", "Agentic behaviour"),
    ("code execution", "Agentic behaviour"),
    ("mcp", "Agentic behaviour"),
    ("grounded", "Agentic behaviour"),
    ("token", "Token counting & context windows"),
    ("context window", "Token counting & context windows"),
    ("caching", "Token counting & context windows"),
    ("rate limit", "Miscellaneous"),
    ("retry", "Miscellaneous"),
    ("concurrent", "Miscellaneous"),
    ("embedding", "Miscellaneous"),
    ("safety", "Miscellaneous"),
    ("litellm", "Miscellaneous"),
];

/// Section title for a focus description.
///
/// Case-insensitive substring match against [`SECTION_KEYWORDS`]; the first
/// row that matches wins, so "image text" lands in `Text`.
///
/// ```rust
/// use exdocs_core::synth::classify_focus;
///
/// assert_eq!(classify_focus("Object detection with bounding boxes"), "Images");
/// assert_eq!(classify_focus("Something new"), "Miscellaneous");
/// ```
#[must_use]
pub fn classify_focus(focus: &str) -> &'static str {
    let focus = focus.to_lowercase();
    SECTION_KEYWORDS
        .iter()
        .find(|(keyword, _)| focus.contains(keyword))
        .map_or(FALLBACK_SECTION, |(_, section)| section)
}
