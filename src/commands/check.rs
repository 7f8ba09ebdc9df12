//! Implementation of the `yamlsettings check` command.

use yamlsettings::Settings;
use yamlsettings::error::Result;

/// Load the settings and summarize what was loaded.
pub fn cmd_check(settings: &Settings) -> Result<String> {
    let root = settings.root()?;
    Ok(format!(
        "ok: {} top-level key(s) from {}",
        root.len(),
        root.label()
    ))
}
