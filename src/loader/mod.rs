//! Settings loading.
//!
//! Resolves a [`SourceSpec`] into one merged [`RawMapping`]. Files that are
//! missing are skipped; files that exist but cannot be read or parsed
//! contribute nothing (and are logged), so a later valid file can still
//! satisfy the load. Only a load with nothing left to merge fails.

mod source;


pub use source::{LoadOptions, SourceSpec};

use crate::error::{Result, SettingsError};
use crate::merge::{deep_merge, drop_nulls};
use crate::parser::{DocumentParser, YamlParser};
use crate::value::{RawMapping, RawValue};
use std::path::Path;
use std::sync::Arc;

/// Loads and merges settings documents.
#[derive(Clone)]
pub struct Loader {
    parser: Arc<dyn DocumentParser>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(YamlParser::default())
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader").finish_non_exhaustive()
    }
}

impl Loader {
    /// Create a loader that parses documents with `parser`.
    pub fn new<P: DocumentParser + 'static>(parser: P) -> Self {
        Self {
            parser: Arc::new(parser),
        }
    }

    /// Load `source` into a single merged mapping.
    ///
    /// # Errors
    ///
    /// * `MissingSource` - `source` names no paths
    /// * `InvalidSettingsSource` - every candidate was missing, unparseable or empty
    pub fn load(
        &self,
        source: &SourceSpec,
        namespace: Option<&str>,
        options: &LoadOptions,
    ) -> Result<RawMapping> {
        if source.is_empty() {
            return Err(SettingsError::MissingSource);
        }

        let mut merged = match source {
            SourceSpec::Mapping(map) => map.clone(),
            _ => self.merge_files(source.paths(), namespace),
        };

        if merged.is_empty() && !matches!(source, SourceSpec::Mapping(_)) {
            return Err(SettingsError::InvalidSettingsSource {
                sources: source
                    .paths()
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            });
        }

        // Stripping may leave nothing; that still counts as a successful load.
        if options.drop_nulls {
            drop_nulls(&mut merged);
        }

        tracing::debug!(
            source = %source.describe(),
            keys = merged.len(),
            "loaded settings"
        );
        Ok(merged)
    }

    fn merge_files<P: AsRef<Path>>(&self, paths: &[P], namespace: Option<&str>) -> RawMapping {
        let mut merged = RawMapping::new();
        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                tracing::debug!(path = %path.display(), "settings file not found, skipping");
                continue;
            }

            let document = match self.read_document(path) {
                Ok(document) => document,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "ignoring settings file that could not be loaded"
                    );
                    continue;
                }
            };

            let contribution = match namespace {
                Some(ns) => select_namespace(document, ns, path),
                None => document,
            };
            deep_merge(&mut merged, contribution);
        }
        merged
    }

    fn read_document(&self, path: &Path) -> Result<RawMapping> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parser.parse(&text)
    }
}

/// Keep only the `namespace` sub-tree of a document; absent means empty.
fn select_namespace(mut document: RawMapping, namespace: &str, path: &Path) -> RawMapping {
    match document.remove(namespace) {
        Some(RawValue::Mapping(section)) => section,
        Some(other) => {
            tracing::warn!(
                path = %path.display(),
                namespace,
                found = other.kind(),
                "namespace is not a mapping, ignoring"
            );
            RawMapping::new()
        }
        None => RawMapping::new(),
    }
}

/// Load `source` with the default YAML parser.
pub fn load(
    source: &SourceSpec,
    namespace: Option<&str>,
    options: &LoadOptions,
) -> Result<RawMapping> {
    Loader::default().load(source, namespace, options)
}
