//! Domain-specific errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read project manifest {}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid project manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },
    #[error("invalid configuration {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
    #[error("failed to write snippets to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize snippets")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse snippets")]
    Parse(#[source] serde_json::Error),
}

impl SnippetError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type SnippetResult<T> = Result<T, SnippetError>;
