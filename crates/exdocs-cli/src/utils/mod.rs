//! Shared helpers for the command implementations.

pub mod logging;
pub mod validation;
