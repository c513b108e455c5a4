//! Infrastructure adapters for config, the project manifest, output, and progress reporting.

pub mod config;
pub mod manifest;
pub mod report;
pub mod sink;
