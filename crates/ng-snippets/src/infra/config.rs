//! Configuration management utilities.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{SnippetError, SnippetResult};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".ng-snippets/config.toml";

/// Layered configuration loaded from defaults, user, and workspace files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: Scan,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub snippet: Snippet,
}

/// Where to look for component files and how to recognize them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    #[serde(default = "Scan::default_source_dir")]
    pub source_dir: String,
    #[serde(default = "Scan::default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "Scan::default_marker")]
    pub marker: String,
    #[serde(default = "Scan::default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub follow_links: bool,
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Scan {
    fn default_source_dir() -> String {
        "src".into()
    }

    fn default_extensions() -> Vec<String> {
        vec!["ts".into(), "js".into()]
    }

    fn default_marker() -> String {
        ".component".into()
    }

    fn default_max_depth() -> usize {
        64
    }
}

impl Default for Scan {
    fn default() -> Self {
        Self {
            source_dir: Self::default_source_dir(),
            extensions: Self::default_extensions(),
            marker: Self::default_marker(),
            max_depth: Self::default_max_depth(),
            follow_links: false,
            ignore: Vec::new(),
        }
    }
}

/// Destination of the generated snippets file, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    #[serde(default = "Output::default_dir")]
    pub dir: String,
    #[serde(default = "Output::default_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub pretty: bool,
}

impl Output {
    fn default_dir() -> String {
        ".vscode".into()
    }

    fn default_file_name() -> String {
        "ng-project.code-snippets".into()
    }

    /// Full path of the snippets file for a project rooted at `root`.
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.dir).join(&self.file_name)
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            file_name: Self::default_file_name(),
            pretty: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default = "Snippet::default_scope")]
    pub scope: String,
}

impl Snippet {
    fn default_scope() -> String {
        "html".into()
    }
}

impl Default for Snippet {
    fn default() -> Self {
        Self {
            scope: Self::default_scope(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, and the project's workspace config.
    pub fn load(root: &Path) -> SnippetResult<Self> {
        Self::load_with_layers(global_config_path(), Some(Self::workspace_path(root)))
    }

    /// Location of the per-project config file.
    pub fn workspace_path(root: &Path) -> PathBuf {
        root.join(DEFAULT_WORKSPACE_CONFIG_PATH)
    }

    /// Merge the built-in defaults with the given optional global and workspace files.
    pub fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
    ) -> SnippetResult<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG, Path::new("<built-in>"))?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        Ok(layers.into_iter().reduce(Config::merge).unwrap_or_default())
    }

    fn from_file(path: &Path) -> SnippetResult<Self> {
        let data = fs::read_to_string(path).map_err(|err| SnippetError::io(path, err))?;
        Self::from_str(&data, path)
    }

    fn from_str(contents: &str, origin: &Path) -> SnippetResult<Self> {
        toml::from_str(contents).map_err(|err| SnippetError::Config {
            path: origin.to_path_buf(),
            reason: err.to_string(),
        })
    }

    fn merge(self, other: Self) -> Self {
        Self {
            scan: merge_scan(self.scan, other.scan),
            output: merge_output(self.output, other.output),
            snippet: merge_snippet(self.snippet, other.snippet),
        }
    }
}

fn merge_scan(base: Scan, overlay: Scan) -> Scan {
    let mut ignore: BTreeSet<String> = base.ignore.into_iter().collect();
    ignore.extend(overlay.ignore);

    Scan {
        source_dir: choose(base.source_dir, overlay.source_dir, Scan::default_source_dir),
        extensions: if overlay.extensions.is_empty()
            || overlay.extensions == Scan::default_extensions()
        {
            base.extensions
        } else {
            overlay.extensions
        },
        marker: choose(base.marker, overlay.marker, Scan::default_marker),
        max_depth: if overlay.max_depth != Scan::default_max_depth() {
            overlay.max_depth
        } else {
            base.max_depth
        },
        follow_links: overlay.follow_links || base.follow_links,
        ignore: ignore.into_iter().collect(),
    }
}

fn merge_output(base: Output, overlay: Output) -> Output {
    Output {
        dir: choose(base.dir, overlay.dir, Output::default_dir),
        file_name: choose(base.file_name, overlay.file_name, Output::default_file_name),
        pretty: overlay.pretty || base.pretty,
    }
}

fn merge_snippet(base: Snippet, overlay: Snippet) -> Snippet {
    Snippet {
        scope: choose(base.scope, overlay.scope, Snippet::default_scope),
    }
}

fn choose(base: String, overlay: String, default_fn: fn() -> String) -> String {
    if overlay != default_fn() {
        overlay
    } else {
        base
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("ng-snippets/config.toml"))
}
