//! Process-wide settings roots.
//!
//! A [`Settings`] value pairs a configured source with a lazily loaded root
//! [`SettingsNode`]. It is meant to live in a `static`:
//!
//! ```no_run
//! use std::sync::LazyLock;
//! use yamlsettings::Settings;
//!
//! static APP: LazyLock<Settings> = LazyLock::new(|| {
//!     Settings::builder()
//!         .source(vec!["config/defaults.yml", "config/local.yml"])
//!         .namespace("production")
//!         .build()
//! });
//!
//! let host = APP.get_by_path("db.host")?;
//! # Ok::<(), yamlsettings::SettingsError>(())
//! ```
//!
//! The first lookup loads the source; later lookups reuse the cached root
//! until [`Settings::reload`] is called. The root sits behind an `RwLock`, and
//! loading happens under the write lock so concurrent first accesses load once.


use crate::error::Result;
use crate::loader::{LoadOptions, Loader, SourceSpec};
use crate::node::{Setting, SettingsNode};
use crate::value::RawValue;
use serde::de::DeserializeOwned;
use std::sync::{Arc, PoisonError, RwLock};

/// A lazily loaded, reloadable settings root.
#[derive(Debug)]
pub struct Settings {
    source: SourceSpec,
    namespace: Option<String>,
    options: LoadOptions,
    loader: Loader,
    root: RwLock<Option<Arc<SettingsNode>>>,
}

impl Settings {
    /// Settings loaded from `source` with default options.
    pub fn new(source: impl Into<SourceSpec>) -> Self {
        Self::builder().source(source).build()
    }

    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    pub fn source(&self) -> &SourceSpec {
        &self.source
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Whether a root is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The root node, loading it on first use.
    pub fn root(&self) -> Result<Arc<SettingsNode>> {
        if let Some(root) = self
            .root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(root));
        }

        let mut slot = self.root.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(root) = slot.as_ref() {
            return Ok(Arc::clone(root));
        }
        let root = Arc::new(self.load_root()?);
        *slot = Some(Arc::clone(&root));
        Ok(root)
    }

    /// Load now instead of on first lookup. A cached root is kept.
    pub fn load(&self) -> Result<()> {
        self.root().map(|_| ())
    }

    /// Discard the cached root and load again from the source.
    ///
    /// If loading fails the root stays unloaded and the next lookup retries.
    pub fn reload(&self) -> Result<()> {
        let mut slot = self.root.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
        tracing::debug!(source = %self.source.describe(), "reloading settings");
        *slot = Some(Arc::new(self.load_root()?));
        Ok(())
    }

    /// Look up a top-level key. See [`SettingsNode::get`].
    pub fn get(&self, key: &str) -> Result<Setting> {
        self.root()?.get(key)
    }

    /// Look up a top-level key without failing when it is absent.
    ///
    /// Still fails if the root itself cannot be loaded.
    pub fn try_get(&self, key: &str) -> Result<Option<Setting>> {
        Ok(self.root()?.try_get(key))
    }

    /// Look up a dotted path. See [`SettingsNode::get_by_path`].
    pub fn get_by_path(&self, path: &str) -> Result<Setting> {
        self.root()?.get_by_path(path)
    }

    /// Deserialize the value at a dotted path into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.root()?.get_as(path)
    }

    /// Store a value on the cached root, loading it first if needed.
    ///
    /// The change lives until the next [`Settings::reload`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<RawValue>) -> Result<()> {
        let mut slot = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let mut root = match slot.take() {
            Some(root) => root,
            None => Arc::new(self.load_root()?),
        };
        Arc::make_mut(&mut root).set(key, value);
        *slot = Some(root);
        Ok(())
    }

    fn load_root(&self) -> Result<SettingsNode> {
        tracing::debug!(
            source = %self.source.describe(),
            namespace = self.namespace.as_deref().unwrap_or(""),
            "loading settings"
        );
        SettingsNode::load_with(
            &self.loader,
            &self.source,
            self.namespace.as_deref(),
            &self.options,
        )
    }
}

/// Builder for [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    source: Option<SourceSpec>,
    namespace: Option<String>,
    options: LoadOptions,
    loader: Option<Loader>,
}

impl SettingsBuilder {
    pub fn source(mut self, source: impl Into<SourceSpec>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Take only this top-level key from each document.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn drop_nulls(mut self, drop_nulls: bool) -> Self {
        self.options.drop_nulls = drop_nulls;
        self
    }

    /// Use a custom loader, e.g. one with a different document parser.
    pub fn loader(mut self, loader: Loader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Build the settings root. Nothing is loaded yet.
    ///
    /// Without a source every lookup fails with `MissingSource`.
    pub fn build(self) -> Settings {
        Settings {
            source: self.source.unwrap_or(SourceSpec::Paths(Vec::new())),
            namespace: self.namespace,
            options: self.options,
            loader: self.loader.unwrap_or_default(),
            root: RwLock::new(None),
        }
    }
}
