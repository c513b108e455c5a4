//! Progress reporting for pipeline runs.

use std::path::Path;
use std::sync::Mutex;

/// Receives progress events from a generation run.
///
/// Implementations must be shareable across the extraction workers.
pub trait Reporter: Send + Sync {
    /// A component produced a snippet under `key`.
    fn generated(&self, key: &str, path: &Path);
    /// A component file was scanned but declared no selector.
    fn skipped(&self, path: &Path);
    /// Two files mapped to the same snippet key; the later one replaced the earlier.
    fn duplicate(&self, key: &str, path: &Path);
    /// The collection was written.
    fn saved(&self, path: &Path, count: usize);
}

/// Forwards progress to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn generated(&self, key: &str, path: &Path) {
        tracing::info!(key, path = %path.display(), "generated snippet");
    }

    fn skipped(&self, path: &Path) {
        tracing::debug!(path = %path.display(), "no selector found, skipping");
    }

    fn duplicate(&self, key: &str, path: &Path) {
        tracing::warn!(key, path = %path.display(), "duplicate snippet key, replacing earlier entry");
    }

    fn saved(&self, path: &Path, count: usize) {
        tracing::info!(path = %path.display(), count, "snippets saved");
    }
}

/// Event recorded by [`MemoryReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Generated(String),
    Skipped(String),
    Duplicate(String),
    Saved(usize),
}

/// Keeps every event in memory, for embedding callers and tests.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: ReportEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

impl Reporter for MemoryReporter {
    fn generated(&self, key: &str, _path: &Path) {
        self.push(ReportEvent::Generated(key.to_owned()));
    }

    fn skipped(&self, path: &Path) {
        self.push(ReportEvent::Skipped(path.display().to_string()));
    }

    fn duplicate(&self, key: &str, _path: &Path) {
        self.push(ReportEvent::Duplicate(key.to_owned()));
    }

    fn saved(&self, _path: &Path, count: usize) {
        self.push(ReportEvent::Saved(count));
    }
}
