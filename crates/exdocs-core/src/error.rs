//! Error types and handling for exdocs-core operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Errors are
//! grouped into the three classes the toolchain distinguishes:
//!
//! - **Degraded**: the caller logs and continues with a fallback value
//!   (documentation fetch failures, missing guideline sections, a navigation
//!   section that does not exist). See [`Error::is_recoverable`].
//! - **Fatal**: the current run stops (schema mismatch from the generator,
//!   missing credential, missing input file, malformed configuration).
//! - **Step failure**: an external build or deploy process exited non-zero;
//!   the captured output travels with the error.
//!
//! ```rust
//! use exdocs_core::Error;
//!
//! let err = Error::NotFound("data/sections.json".to_string());
//! assert_eq!(err.category(), "not_found");
//! assert!(!err.is_recoverable());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for exdocs-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading input documents, creating output directories and
    /// writing rendered pages. A multi-file write that fails partway leaves
    /// the files already written in place.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O operation failed on a known path.
    #[error("IO error at '{}': {source}", path.display())]
    IoAt {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Network operation failed.
    ///
    /// Raised by the content fetcher and the generation client. The fetcher
    /// never lets this escape a run; it degrades to an empty context instead.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote server answered with a non-success status.
    #[error("HTTP {status} from '{url}'")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// URL is malformed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Structured document (JSON or YAML) could not be parsed or written.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in `exdocs.toml`
    /// - Required credential missing from the environment
    /// - An empty argv list for an external step
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required input file or directory does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The generator returned a payload that does not match the example schema.
    ///
    /// The raw payload is kept so the caller can show what came back.
    #[error("Generated response does not match the example schema: {reason}")]
    SchemaMismatch {
        /// Why the payload was rejected.
        reason: String,
        /// Payload exactly as received.
        raw: String,
    },

    /// The generation API rejected the request.
    #[error("Generation request failed with HTTP {status}: {body}")]
    Generation {
        /// Status code returned by the API.
        status: u16,
        /// Response body, usually a JSON error document.
        body: String,
    },

    /// A precondition for a migration step is not met.
    #[error("{step}: {reason}")]
    Precondition {
        /// Step that refused to run.
        step: String,
        /// Missing prerequisite, phrased for the user.
        reason: String,
    },

    /// An external process exited unsuccessfully.
    #[error("{step} failed ({status})")]
    StepFailed {
        /// Step that launched the process.
        step: String,
        /// Exit status description.
        status: String,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Attach a path to an I/O error.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Whether the run may continue with a degraded input after this error.
    ///
    /// Network and HTTP status failures are recoverable: the fetcher falls
    /// back to an empty context. Nothing is ever retried automatically.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::HttpStatus { .. } | Self::InvalidUrl(_)
        )
    }

    /// Get the error category as a string identifier.
    ///
    /// - `"io"` - File system operations
    /// - `"network"` - HTTP requests
    /// - `"invalid_url"` - URL validation
    /// - `"serialization"` - JSON/YAML documents
    /// - `"config"` - Configuration and credentials
    /// - `"not_found"` - Missing input files
    /// - `"schema"` - Generator output rejected
    /// - `"generation"` - Generator API failure
    /// - `"step"` - Migration step precondition or process failure
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::IoAt { .. } => "io",
            Self::Network(_) | Self::HttpStatus { .. } => "network",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::SchemaMismatch { .. } => "schema",
            Self::Generation { .. } => "generation",
            Self::Precondition { .. } | Self::StepFailed { .. } => "step",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
