//! CLI command implementations.

pub mod donations;
