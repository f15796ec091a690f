//! CLI error handling with semantic exit codes.
//!
//! Errors carry a category that decides the process exit code, so scripts
//! driving the tools can tell a missing input from a rejected generation.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected error or failed external step |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 3 | `NotFound` | Required input file missing |
//! | 4 | `Network` | Network or fetch failure |
//! | 5 | `Generation` | Generation API failure or schema mismatch |
//!
//! `exdocs-migrate` ignores the category and always exits with 1.

use std::fmt;
use std::process::ExitCode;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected error or failed external step (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    ///
    /// Includes a missing API credential and malformed `exdocs.toml`.
    Usage = 2,

    /// Required input not found (exit code 3).
    NotFound = 3,

    /// Network or fetch failure (exit code 4).
    Network = 4,

    /// Generation request rejected or its reply unusable (exit code 5).
    Generation = 5,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Network => "network error",
            Self::Generation => "generation error",
        }
    }

    /// Category for a core library error.
    #[must_use]
    pub fn from_core(err: &exdocs_core::Error) -> Self {
        match err.category() {
            "config" | "invalid_url" => Self::Usage,
            "not_found" => Self::NotFound,
            "network" => Self::Network,
            "schema" | "generation" => Self::Generation,
            _ => Self::Internal,
        }
    }

    /// Infer the error category from an error message.
    ///
    /// Heuristic fallback for errors that were never categorized.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("schema") || msg_lower.contains("generation") {
            return Self::Generation;
        }

        if msg_lower.contains("network")
            || msg_lower.contains("connection")
            || msg_lower.contains("dns")
            || msg_lower.contains("http")
            || msg_lower.contains("fetch")
        {
            return Self::Network;
        }

        if msg_lower.contains("not found")
            || msg_lower.contains("no such")
            || msg_lower.contains("does not exist")
        {
            return Self::NotFound;
        }

        if msg_lower.contains("invalid argument")
            || msg_lower.contains("invalid example name")
            || msg_lower.contains("invalid value")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a not-found error.
    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::NotFound, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Extension trait for attaching a category to any error.
pub trait IntoCliError {
    /// Convert to a `CliError` with an explicit category.
    fn with_category(self, category: ErrorCategory) -> CliError;
}

impl<E: Into<anyhow::Error>> IntoCliError for E {
    fn with_category(self, category: ErrorCategory) -> CliError {
        CliError::new(category, self)
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Explicit `CliError`s win, then core library errors, then the message
/// heuristic.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    if let Some(core_err) = err.downcast_ref::<exdocs_core::Error>() {
        return ErrorCategory::from_core(core_err).exit_code();
    }

    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}
