//! Project manifest (`package.json`) access.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::errors::{SnippetError, SnippetResult};

const MANIFEST_FILE: &str = "package.json";

/// The subset of `package.json` the generator needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectManifest {
    pub name: String,
}

impl ProjectManifest {
    /// Location of the manifest for a project rooted at `root`.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE)
    }

    /// Read and parse the manifest under `root`.
    pub fn load(root: &Path) -> SnippetResult<Self> {
        let path = Self::path_in(root);
        let data = fs::read_to_string(&path).map_err(|source| SnippetError::ManifestRead {
            path: path.clone(),
            source,
        })?;
        Self::parse(&data, &path)
    }

    fn parse(data: &str, path: &Path) -> SnippetResult<Self> {
        let manifest: ProjectManifest =
            serde_json::from_str(data).map_err(|err| SnippetError::Manifest {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;
        if manifest.name.trim().is_empty() {
            return Err(SnippetError::Manifest {
                path: path.to_path_buf(),
                reason: "`name` is empty".into(),
            });
        }
        Ok(manifest)
    }
}
