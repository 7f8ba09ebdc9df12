//! Implementation of the `yamlsettings keys` command.
//!
//! Lists the keys of the root or of a section, one per line. Keys that are not
//! identifier-shaped are marked, since they can only be reached by explicit
//! lookup.

use crate::cli::KeysArgs;
use std::fmt::Write;
use std::sync::Arc;
use yamlsettings::error::{Result, SettingsError};
use yamlsettings::{RawValue, Settings, SettingsNode, is_accessor_key};

pub fn cmd_keys(settings: &Settings, args: &KeysArgs) -> Result<String> {
    let section: Arc<SettingsNode> = match &args.path {
        None => settings.root()?,
        Some(path) => {
            let setting = settings.get_by_path(path)?;
            let kind = setting.as_value().map_or("section", RawValue::kind);
            setting.into_section().ok_or_else(|| {
                SettingsError::UserError(format!("'{}' is a {}, not a section", path, kind))
            })?
        }
    };

    let mut out = String::new();
    for key in section.keys() {
        if is_accessor_key(key) {
            let _ = writeln!(out, "{}", key);
        } else {
            let _ = writeln!(out, "{}  (lookup only)", key);
        }
    }
    Ok(out)
}
