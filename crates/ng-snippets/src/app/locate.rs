//! Component file discovery.

use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};

use crate::domain::errors::{SnippetError, SnippetResult};
use crate::infra::config::Scan;

/// Inputs for a locator walk.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub marker: String,
    pub max_depth: usize,
    pub follow_links: bool,
    pub ignore: Vec<String>,
}

impl LocatorConfig {
    pub fn from_root(root: PathBuf, scan: &Scan) -> Self {
        Self {
            root,
            extensions: scan.extensions.clone(),
            marker: scan.marker.clone(),
            max_depth: scan.max_depth,
            follow_links: scan.follow_links,
            ignore: scan.ignore.clone(),
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Whether `path` names a component file under this configuration.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|known| known == ext) && self.snippet_key(path).is_some()
    }

    /// Snippet key for a component file: the base name with marker and extension removed.
    ///
    /// `hero-detail.component.ts` yields `hero-detail`.
    pub fn snippet_key(&self, path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        let key = stem.strip_suffix(self.marker.as_str())?;
        (!key.is_empty()).then(|| key.to_owned())
    }
}

/// Walks a source tree depth-first and collects component files.
#[derive(Debug, Default)]
pub struct Locator;

impl Locator {
    pub fn new() -> Self {
        Self
    }

    /// Return every component file under `cfg.root`, ordered by path.
    ///
    /// Unreadable directories abort the walk with the offending path. Symlink loops (only
    /// reachable with `follow_links`) are logged and not descended into.
    pub fn locate(&self, cfg: &LocatorConfig) -> SnippetResult<Vec<PathBuf>> {
        let meta = std::fs::metadata(&cfg.root).map_err(|err| SnippetError::io(&cfg.root, err))?;
        if !meta.is_dir() {
            return Err(SnippetError::io(
                &cfg.root,
                io::Error::other("source root is not a directory"),
            ));
        }

        let matcher = build_ignore_matcher(cfg)?;
        let mut builder = WalkBuilder::new(&cfg.root);
        builder
            .standard_filters(false)
            .follow_links(cfg.follow_links)
            .max_depth(Some(cfg.max_depth))
            .sort_by_file_name(|a, b| a.cmp(b));

        let root = cfg.root.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            if matcher.should_skip(rel) {
                tracing::warn!(path = %rel.display(), "excluded by scan.ignore");
                return false;
            }
            true
        });

        let mut files = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) if is_loop(&err) => {
                    tracing::warn!(error = %err, "symlink loop, not descending");
                    continue;
                }
                Err(err) => return Err(walk_error(&cfg.root, err)),
            };
            if entry.depth() == cfg.max_depth && entry.file_type().is_some_and(|ft| ft.is_dir()) {
                tracing::warn!(
                    path = %entry.path().display(),
                    max_depth = cfg.max_depth,
                    "depth limit reached, not descending"
                );
            }
            if is_component_file(&entry, cfg) {
                tracing::debug!(path = %entry.path().display(), "located component");
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

fn is_component_file(entry: &DirEntry, cfg: &LocatorConfig) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_file()) && cfg.matches(entry.path())
}

fn is_loop(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => is_loop(err),
        _ => false,
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

fn walk_error(root: &Path, err: ignore::Error) -> SnippetError {
    let message = err.to_string();
    let path = error_path(&err).unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    SnippetError::io(path, source)
}

#[derive(Debug, Clone)]
struct IgnoreMatcher {
    globs: Option<GlobSet>,
}

impl IgnoreMatcher {
    fn should_skip(&self, rel: &Path) -> bool {
        self.globs.as_ref().is_some_and(|set| set.is_match(rel))
    }
}

fn build_ignore_matcher(cfg: &LocatorConfig) -> SnippetResult<IgnoreMatcher> {
    if cfg.ignore.is_empty() {
        return Ok(IgnoreMatcher { globs: None });
    }

    let invalid = |reason: String| SnippetError::Config {
        path: PathBuf::from("scan.ignore"),
        reason,
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in &cfg.ignore {
        let glob = Glob::new(pattern).map_err(|err| invalid(err.to_string()))?;
        builder.add(glob);
    }
    let globs = builder.build().map_err(|err| invalid(err.to_string()))?;

    Ok(IgnoreMatcher { globs: Some(globs) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Ok(mut guard) = self.0.lock() {
                guard.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` with warnings captured as plain text.
    fn with_captured_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let logs = buffer
            .0
            .lock()
            .map(|guard| String::from_utf8_lossy(&guard).into_owned())
            .unwrap_or_default();
        (out, logs)
    }

    fn config_for(root: &Path) -> LocatorConfig {
        LocatorConfig::from_root(root.to_path_buf(), &Scan::default())
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|path| {
                path.strip_prefix(root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn finds_component_files_at_any_depth() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();

        fs::create_dir_all(root.join("app/heroes/detail"))?;
        fs::write(root.join("app/app.component.ts"), "")?;
        fs::write(root.join("app/heroes/heroes.component.ts"), "")?;
        fs::write(root.join("app/heroes/detail/detail.component.js"), "")?;
        fs::write(root.join("app/heroes/hero.service.ts"), "")?;
        fs::write(root.join("app/heroes/heroes.component.spec.ts"), "")?;
        fs::write(root.join("app/heroes/heroes.component.html"), "")?;
        fs::write(root.join("app/heroes/heroes.component.tsx"), "")?;
        fs::write(root.join("main.ts"), "")?;

        let files = Locator::new().locate(&config_for(root))?;

        assert_eq!(
            relative(root, &files),
            [
                "app/app.component.ts",
                "app/heroes/detail/detail.component.js",
                "app/heroes/heroes.component.ts",
            ]
        );
        Ok(())
    }

    #[test]
    fn includes_hidden_and_gitignored_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();

        fs::create_dir_all(root.join(".shared"))?;
        fs::create_dir_all(root.join("generated"))?;
        fs::write(root.join(".gitignore"), "generated/\n")?;
        fs::write(root.join(".shared/menu.component.ts"), "")?;
        fs::write(root.join("generated/stub.component.ts"), "")?;

        let files = Locator::new().locate(&config_for(root))?;
        assert_eq!(
            relative(root, &files),
            [".shared/menu.component.ts", "generated/stub.component.ts"]
        );
        Ok(())
    }

    #[test]
    fn honours_ignore_globs() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();

        fs::create_dir_all(root.join("legacy"))?;
        fs::create_dir_all(root.join("app"))?;
        fs::write(root.join("legacy/old.component.ts"), "")?;
        fs::write(root.join("app/new.component.ts"), "")?;

        let mut cfg = config_for(root);
        cfg.ignore.push("legacy".into());

        let (files, logs) = with_captured_warnings(|| Locator::new().locate(&cfg));
        assert_eq!(relative(root, &files?), ["app/new.component.ts"]);
        assert!(logs.contains("excluded by scan.ignore"));
        assert!(logs.contains("legacy"));
        Ok(())
    }

    #[test]
    fn depth_guard_limits_recursion() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();

        fs::create_dir_all(root.join("a/b"))?;
        fs::write(root.join("a/shallow.component.ts"), "")?;
        fs::write(root.join("a/b/deep.component.ts"), "")?;

        let cfg = config_for(root).with_max_depth(2);
        let (files, logs) = with_captured_warnings(|| Locator::new().locate(&cfg));
        assert_eq!(relative(root, &files?), ["a/shallow.component.ts"]);
        assert!(logs.contains("depth limit reached"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loops_are_skipped_when_following_links() -> Result<()> {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("a"))?;
        fs::write(root.join("a/card.component.ts"), "")?;
        symlink(root, root.join("a/back"))?;

        let mut cfg = config_for(root);
        cfg.follow_links = true;

        let files = Locator::new().locate(&cfg)?;
        assert_eq!(relative(root, &files), ["a/card.component.ts"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn broken_entry_mid_walk_reports_its_path() -> Result<()> {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("a"))?;
        symlink(root.join("missing"), root.join("a/dangling"))?;

        let mut cfg = config_for(root);
        cfg.follow_links = true;

        match Locator::new().locate(&cfg).unwrap_err() {
            SnippetError::Io { path, source } => {
                assert_eq!(path, root.join("a/dangling"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn missing_root_reports_path() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("src");

        let err = Locator::new().locate(&config_for(&missing)).unwrap_err();
        match err {
            SnippetError::Io { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn snippet_key_strips_marker_and_extension() {
        let cfg = config_for(Path::new("."));
        assert_eq!(
            cfg.snippet_key(Path::new("src/app/hero-detail.component.ts")),
            Some("hero-detail".into())
        );
        assert_eq!(cfg.snippet_key(Path::new("src/hero.service.ts")), None);
        assert_eq!(cfg.snippet_key(Path::new("src/.component.ts")), None);
        assert!(!cfg.matches(Path::new("src/hero.component.spec.ts")));
        assert!(cfg.matches(Path::new("src/hero.component.js")));
    }
}
