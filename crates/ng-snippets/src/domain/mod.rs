//! Core types shared by the scanning, extraction, and snippet stages.

pub mod errors;
pub mod model;
