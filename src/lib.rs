//! yamlsettings: layered YAML settings with labeled, lazily wrapped sections.
//!
//! One or more documents are loaded, deep-merged in order (later documents win
//! on conflicting scalars, mappings merge key by key) and wrapped in a
//! [`SettingsNode`]. Lookups return either a nested section or a plain value,
//! and a missing key fails with an error naming the key and the section it was
//! looked up in.
//!
//! ```no_run
//! use yamlsettings::{LoadOptions, SettingsNode, SourceSpec};
//!
//! let source = SourceSpec::from(vec!["config/defaults.yml", "config/local.yml"]);
//! let root = SettingsNode::load(&source, None, &LoadOptions::default())?;
//! let port: u16 = root.get_as("server.port")?;
//! # Ok::<(), yamlsettings::SettingsError>(())
//! ```

pub mod error;
pub mod exit_codes;
pub mod loader;
pub mod merge;
pub mod node;
pub mod parser;
pub mod settings;
pub mod template;
pub mod value;

pub use error::{Result, SettingsError};
pub use loader::{LoadOptions, Loader, SourceSpec, load};
pub use merge::{deep_merge, drop_nulls};
pub use node::{Setting, SettingsNode, is_accessor_key};
pub use parser::{DocumentParser, YamlParser};
pub use settings::{Settings, SettingsBuilder};
pub use value::{RawMapping, RawValue, mapping};
