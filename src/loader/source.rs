//! Settings sources and load options.

use crate::value::RawMapping;
use std::path::{Path, PathBuf};

/// Where settings come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    /// A single document on disk.
    Path(PathBuf),
    /// Several documents, deep-merged in list order (later files win).
    Paths(Vec<PathBuf>),
    /// An already-built mapping, used as-is.
    Mapping(RawMapping),
}

impl SourceSpec {
    /// The candidate files in merge order. Empty for in-memory sources.
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            SourceSpec::Path(path) => std::slice::from_ref(path),
            SourceSpec::Paths(paths) => paths,
            SourceSpec::Mapping(_) => &[],
        }
    }

    /// True when nothing loadable was configured.
    pub fn is_empty(&self) -> bool {
        match self {
            SourceSpec::Path(path) => path.as_os_str().is_empty(),
            SourceSpec::Paths(paths) => paths.iter().all(|p| p.as_os_str().is_empty()),
            SourceSpec::Mapping(_) => false,
        }
    }

    /// Human-readable form used as the root section label.
    pub fn describe(&self) -> String {
        match self {
            SourceSpec::Path(path) => path.display().to_string(),
            SourceSpec::Paths(paths) => paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            SourceSpec::Mapping(_) => "in-memory settings".to_string(),
        }
    }
}

impl From<&str> for SourceSpec {
    fn from(path: &str) -> Self {
        SourceSpec::Path(PathBuf::from(path))
    }
}

impl From<&Path> for SourceSpec {
    fn from(path: &Path) -> Self {
        SourceSpec::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for SourceSpec {
    fn from(path: PathBuf) -> Self {
        SourceSpec::Path(path)
    }
}

impl From<Vec<PathBuf>> for SourceSpec {
    fn from(paths: Vec<PathBuf>) -> Self {
        SourceSpec::Paths(paths)
    }
}

impl From<Vec<&str>> for SourceSpec {
    fn from(paths: Vec<&str>) -> Self {
        SourceSpec::Paths(paths.into_iter().map(PathBuf::from).collect())
    }
}

impl From<RawMapping> for SourceSpec {
    fn from(map: RawMapping) -> Self {
        SourceSpec::Mapping(map)
    }
}

/// Options controlling how a load is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Replace a node's existing contents (default) instead of deep-merging into them.
    pub replace_mode: bool,
    /// Strip null values, and mappings emptied by that, after merging.
    pub drop_nulls: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            replace_mode: true,
            drop_nulls: false,
        }
    }
}
