//! Application layer: locating component files, extracting bindings, and building snippets.

pub mod extract;
pub mod locate;
pub mod pipeline;
pub mod snippet;
