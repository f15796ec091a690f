//! # exdocs-core
//!
//! Core functionality for exdocs - tooling that maintains an example-driven
//! documentation site.
//!
//! The crate covers three independent jobs that share one data model:
//!
//! - **Synthesis**: fetch documentation pages, ask a generative model for a
//!   new annotated example, and add it to the site ([`synth`])
//! - **Conversion**: turn the legacy JSON catalog into Markdown pages and a
//!   navigation manifest ([`convert`], [`nav`])
//! - **Migration**: drive the external install, build, serve and deploy
//!   commands ([`migrate`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exdocs_core::{Config, convert::Converter};
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("."))?;
//! let report = Converter::new(&config).convert()?;
//! println!("wrote {} pages", report.pages);
//! # Ok::<(), exdocs_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`]. Recoverable failures are
//! handled inside the crate (a failed fetch becomes empty context); the
//! rest reach the caller:
//!
//! ```rust
//! use exdocs_core::Error;
//!
//! fn describe(err: &Error) -> &'static str {
//!     match err {
//!         Error::SchemaMismatch { .. } => "generator output rejected",
//!         Error::StepFailed { .. } => "external command failed",
//!         e if e.is_recoverable() => "degraded",
//!         _ => "fatal",
//!     }
//! }
//! # let _ = describe(&Error::NotFound("x".into()));
//! ```

/// Project configuration from `exdocs.toml`
pub mod config;
/// Legacy catalog conversion
pub mod convert;
/// Error types and result aliases
pub mod error;
/// Documentation page fetching
pub mod fetcher;
/// External build and publish steps
pub mod migrate;
/// Navigation manifest model and YAML output
pub mod nav;
/// Slug helpers
pub mod slug;
/// Generated example synthesis
pub mod synth;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use config::{Config, GeneratorConfig, MigrateConfig, PathsConfig, SiteConfig};
pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use slug::slugify;
pub use types::*;
