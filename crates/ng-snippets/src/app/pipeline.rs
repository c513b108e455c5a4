//! End-to-end snippet generation for a project root.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::app::extract;
use crate::app::locate::{Locator, LocatorConfig};
use crate::app::snippet::SnippetBuilder;
use crate::domain::errors::{SnippetError, SnippetResult};
use crate::domain::model::{SnippetCollection, SnippetRecord, SourceFile};
use crate::infra::config::Config;
use crate::infra::manifest::ProjectManifest;
use crate::infra::report::Reporter;
use crate::infra::sink::SnippetSink;

/// A scanned file and the snippet it produced, if any.
type Scanned = (PathBuf, Option<(String, SnippetRecord)>);

/// Outcome of a full generation run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub collection: SnippetCollection,
    pub output_path: PathBuf,
    pub project: String,
}

/// Runs locate, extract, build and persist for a project.
pub struct Generator<'a> {
    config: &'a Config,
    reporter: &'a dyn Reporter,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config, reporter: &'a dyn Reporter) -> Self {
        Self { config, reporter }
    }

    /// Generate snippets for the project at `root` and write them to the configured file.
    ///
    /// The output file is rebuilt from scratch on every run.
    pub fn generate(&self, root: &Path) -> SnippetResult<GenerateResult> {
        let project = ProjectManifest::load(root)?.name;
        let collection = self.collect(root, &project)?;

        let sink = SnippetSink::new(root, &self.config.output);
        sink.save(&collection)?;
        self.reporter.saved(sink.path(), collection.len());

        Ok(GenerateResult {
            collection,
            output_path: sink.path().to_path_buf(),
            project,
        })
    }

    /// Build the snippet collection for `root` without touching the output file.
    ///
    /// Files are read and scanned in parallel; any unreadable file aborts the run.
    pub fn collect(&self, root: &Path, project: &str) -> SnippetResult<SnippetCollection> {
        let locator_cfg =
            LocatorConfig::from_root(root.join(&self.config.scan.source_dir), &self.config.scan);
        let files = Locator::new().locate(&locator_cfg)?;
        tracing::debug!(count = files.len(), "component files located");

        let builder = SnippetBuilder::new(project).with_scope(self.config.snippet.scope.clone());

        let scanned: Vec<Scanned> = files
            .into_par_iter()
            .map(|path| -> SnippetResult<Scanned> {
                let source = read_source(path)?;
                let snippet = locator_cfg.snippet_key(&source.path).and_then(|key| {
                    extract::extract(&source.contents)
                        .map(|descriptor| (key, builder.build(&descriptor)))
                });
                Ok((source.path, snippet))
            })
            .collect::<SnippetResult<_>>()?;

        let mut collection = SnippetCollection::new();
        for (path, snippet) in scanned {
            match snippet {
                Some((key, record)) => {
                    self.reporter.generated(&key, &path);
                    if collection.insert(key.as_str(), record).is_some() {
                        self.reporter.duplicate(&key, &path);
                    }
                }
                None => self.reporter.skipped(&path),
            }
        }

        Ok(collection)
    }
}

fn read_source(path: PathBuf) -> SnippetResult<SourceFile> {
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(SourceFile { path, contents }),
        Err(err) => Err(SnippetError::io(path, err)),
    }
}
