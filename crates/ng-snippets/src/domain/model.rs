//! Domain models for scanned components and the snippets generated from them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A component source file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Direction of a declared binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BindingKind {
    /// One-way property binding, rendered as `[name]="type"`.
    Input,
    /// Event binding, rendered as `(name)=""`.
    Output,
}

/// One property a component exposes to its host template.
///
/// Ordering derives from field order, so sorting a list of bindings puts inputs before outputs
/// and sorts by name within each kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Binding {
    pub kind: BindingKind,
    pub name: String,
    /// Free-text type annotation, empty when the declaration carries none.
    pub type_hint: String,
}

impl Binding {
    /// Build a binding, returning `None` when the trimmed name is empty.
    pub fn new(kind: BindingKind, name: &str, type_hint: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            name: name.to_owned(),
            type_hint: type_hint.trim().to_owned(),
        })
    }
}

/// A component recognized in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    /// Markup selector the component renders as.
    pub tag_name: String,
    /// Inputs first, then outputs, each sorted by name.
    pub bindings: Vec<Binding>,
}

/// A single editor snippet as stored in a `.code-snippets` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetRecord {
    pub prefix: Vec<String>,
    pub body: Vec<String>,
    pub description: String,
    pub scope: String,
}

/// All snippets generated in one run, keyed by snippet key.
///
/// Backed by a `BTreeMap` so serialization order is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetCollection {
    entries: BTreeMap<String, SnippetRecord>,
}

impl SnippetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record previously stored under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        record: SnippetRecord,
    ) -> Option<SnippetRecord> {
        self.entries.insert(key.into(), record)
    }

    pub fn get(&self, key: &str) -> Option<&SnippetRecord> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
