//! Numbered example directories (`001-hello-world`, `002-streaming-text`, ...).

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Three-digit prefix followed by a hyphen.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static NUMBERED_DIR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{3})-").unwrap());

/// Highest number a three-digit prefix can hold.
pub const MAX_EXAMPLE_NUMBER: u32 = 999;

/// Number for the next example: one past the highest existing prefix.
///
/// Only directories are considered. A missing examples directory, or one
/// without numbered entries, yields 1. Gaps are not reused. Once `999` is
/// taken there is no next number and [`Error::Precondition`] is returned.
pub fn next_example_number(examples_dir: &Path) -> Result<u32> {
    if !examples_dir.exists() {
        return Ok(1);
    }

    let entries = std::fs::read_dir(examples_dir).map_err(|e| Error::io_at(examples_dir, e))?;
    let mut highest = 0;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io_at(examples_dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(number) = name.to_str().and_then(example_number) else {
            continue;
        };
        highest = highest.max(number);
    }
    if highest >= MAX_EXAMPLE_NUMBER {
        return Err(Error::Precondition {
            step: "numbering".to_string(),
            reason: format!(
                "{} already uses example number {MAX_EXAMPLE_NUMBER}; folder prefixes are limited to three digits",
                examples_dir.display()
            ),
        });
    }
    Ok(highest + 1)
}

/// Numeric prefix of a directory name like `"007-video-clips"`.
#[must_use]
pub fn example_number(dir_name: &str) -> Option<u32> {
    NUMBERED_DIR_RE
        .captures(dir_name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Directory name for example `number` with slug `name`.
///
/// ```rust
/// use exdocs_core::synth::example_folder_name;
///
/// assert_eq!(example_folder_name(7, "hello-world"), "007-hello-world");
/// ```
#[must_use]
pub fn example_folder_name(number: u32, name: &str) -> String {
    format!("{number:03}-{name}")
}

/// Slug part of a numbered directory name, without the prefix.
#[must_use]
pub fn example_stem(dir_name: &str) -> &str {
    if NUMBERED_DIR_RE.is_match(dir_name) {
        &dir_name[4..]
    } else {
        dir_name
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_starts_at_one() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(next_example_number(&tmp.path().join("examples")).unwrap(), 1);
    }

    #[test]
    fn test_next_number_skips_unnumbered_entries() {
        let tmp = TempDir::new().unwrap();
        for dir in ["001-hello", "004-chat", "12-short", "notes", "0055-long"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
        }
        // Files never count, even with a numbered name.
        fs::write(tmp.path().join("009-readme.md"), "x").unwrap();

        // "0055-long" does not match: the prefix must be exactly three digits.
        assert_eq!(next_example_number(tmp.path()).unwrap(), 5);
    }

    #[test]
    fn test_gaps_are_not_reused() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("001-foo")).unwrap();
        fs::create_dir(tmp.path().join("003-bar")).unwrap();
        assert_eq!(next_example_number(tmp.path()).unwrap(), 4);
    }

    #[test]
    fn test_numbers_stop_at_three_digits() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("998-almost")).unwrap();
        assert_eq!(next_example_number(tmp.path()).unwrap(), 999);

        fs::create_dir(tmp.path().join("999-last")).unwrap();
        let err = next_example_number(tmp.path()).unwrap_err();
        assert_eq!(err.category(), "step");
        assert!(err.to_string().contains("three digits"));
    }

    #[test]
    fn test_empty_directory_starts_at_one() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(next_example_number(tmp.path()).unwrap(), 1);
    }

    #[test]
    fn test_stem_and_number() {
        assert_eq!(example_number("002-streaming-text"), Some(2));
        assert_eq!(example_stem("002-streaming-text"), "streaming-text");
        assert_eq!(example_stem("streaming-text"), "streaming-text");
        assert_eq!(example_number("streaming"), None);
    }
}
