//! Input validation utilities

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::error::CliError;

/// Allowed example names.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static EXAMPLE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Hint shown when a name is rejected.
pub const EXAMPLE_NAME_RULE: &str = "use only lowercase letters, numbers, and hyphens";

/// Whether `name` can be used as an example slug.
#[must_use]
pub fn is_valid_example_name(name: &str) -> bool {
    EXAMPLE_NAME_RE.is_match(name)
}

/// Validate an example name, reporting a usage error when it is rejected.
pub fn validate_example_name(name: &str) -> Result<()> {
    if is_valid_example_name(name) {
        return Ok(());
    }
    Err(CliError::usage(anyhow::anyhow!("Invalid example name '{name}': {EXAMPLE_NAME_RULE}")).into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::exit_code_from_error;

    #[test]
    fn test_valid_names() {
        for name in ["hello-world", "abc123", "003-x", "-"] {
            assert!(is_valid_example_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "Hello", "snake_case", "with space", "dots.too", "naïve"] {
            assert!(!is_valid_example_name(name), "{name} should be rejected");
        }
    }

    #[test]
    fn test_rejection_is_usage_error() {
        let err = validate_example_name("Bad_Name").unwrap_err();
        assert_eq!(exit_code_from_error(&err), 2);
        assert!(err.to_string().contains("Bad_Name"));
    }
}
