//! Persistence of the generated snippet collection.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::errors::{SnippetError, SnippetResult};
use crate::domain::model::SnippetCollection;
use crate::infra::config::Output;

/// Serialize a collection the way it is written to disk.
pub fn render(collection: &SnippetCollection, pretty: bool) -> SnippetResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(collection)
    } else {
        serde_json::to_string(collection)
    };
    rendered.map_err(SnippetError::Serialize)
}

/// Parse a previously written snippets file.
pub fn parse(data: &str) -> SnippetResult<SnippetCollection> {
    serde_json::from_str(data).map_err(SnippetError::Parse)
}

/// Writes the snippets file under a project root, creating the output directory as needed.
#[derive(Debug, Clone)]
pub struct SnippetSink {
    path: PathBuf,
    pretty: bool,
}

impl SnippetSink {
    pub fn new(root: &Path, output: &Output) -> Self {
        Self {
            path: output.path_in(root),
            pretty: output.pretty,
        }
    }

    /// Location of the snippets file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the snippets file with `collection`.
    pub fn save(&self, collection: &SnippetCollection) -> SnippetResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|err| SnippetError::write(dir, err))?;
        }

        let data = render(collection, self.pretty)?;
        fs::write(&self.path, data).map_err(|err| SnippetError::write(&self.path, err))?;
        Ok(())
    }
}
