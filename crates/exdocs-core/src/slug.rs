//! Slug derivation for file and directory names.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that are neither word characters, whitespace nor hyphens.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static DISALLOWED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

/// Runs of whitespace, underscores or hyphens.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").unwrap());

/// Convert text to a URL- and filesystem-friendly slug.
///
/// Lowercases, drops everything outside word characters, whitespace and
/// hyphens, then collapses each separator run into one hyphen. Leading and
/// trailing separators are kept as a single hyphen. Distinct titles may map
/// to the same slug; later output then overwrites earlier output.
///
/// ```rust
/// use exdocs_core::slugify;
///
/// assert_eq!(slugify("Token counting & context windows"), "token-counting-context-windows");
/// assert_eq!(slugify("Hello_World"), "hello-world");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED_RE.replace_all(&lowered, "");
    SEPARATOR_RE.replace_all(&stripped, "-").into_owned()
}

/// Directory name used by the synthesizer for a navigation section title.
///
/// Lowercases and turns `" & "` and single spaces into hyphens. For the
/// built-in section titles this agrees with [`slugify`].
///
/// ```rust
/// use exdocs_core::slug::section_dir_name;
///
/// assert_eq!(section_dir_name("PDFs and other data types"), "pdfs-and-other-data-types");
/// ```
#[must_use]
pub fn section_dir_name(section: &str) -> String {
    section.to_lowercase().replace(" & ", "-").replace(' ', "-")
}

/// Human title derived from a kebab-case slug: `"hello-world"` -> `"Hello World"`.
#[must_use]
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Streaming text"), "streaming-text");
        assert_eq!(slugify("Agentic behaviour"), "agentic-behaviour");
        assert_eq!(slugify("Gemini 2.0: Flash!"), "gemini-20-flash");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a  --  b__c"), "a-b-c");
        assert_eq!(slugify(" padded "), "-padded-");
    }

    #[test]
    fn test_slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Café Über"), "café-über");
    }

    #[test]
    fn test_section_dir_name_matches_slug_for_known_sections() {
        for title in [
            "Text",
            "Images",
            "Audio",
            "Video",
            "PDFs and other data types",
            "Agentic behaviour",
            "Token counting & context windows",
            "Miscellaneous",
        ] {
            assert_eq!(section_dir_name(title), slugify(title), "{title}");
        }
    }

    #[test]
    fn test_title_from_slug() {
        assert_eq!(title_from_slug("hello-world"), "Hello World");
        assert_eq!(title_from_slug("abc123"), "Abc123");
        assert_eq!(title_from_slug(""), "");
    }

    proptest! {
        #[test]
        fn prop_slugify_is_idempotent(input in "[ -~éÉüÜß_]{0,48}") {
            let once = slugify(&input);
            prop_assert_eq!(slugify(&once), once);
        }

        #[test]
        fn prop_slug_has_no_separator_runs(input in "[ -~]{0,48}") {
            let slug = slugify(&input);
            prop_assert!(!slug.contains("--"));
            prop_assert!(!slug.contains(' '));
            prop_assert!(!slug.contains('_'));
        }
    }
}
