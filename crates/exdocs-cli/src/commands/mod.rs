//! Command implementations, one per binary.

pub mod convert;
pub mod generate;
pub mod migrate;
