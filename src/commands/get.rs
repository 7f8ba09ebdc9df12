//! Implementation of the `yamlsettings get` command.

use super::render_value;
use crate::cli::GetArgs;
use yamlsettings::Settings;
use yamlsettings::error::Result;

/// Look up a dotted path and render what it resolves to.
pub fn cmd_get(settings: &Settings, args: &GetArgs) -> Result<String> {
    let setting = settings.get_by_path(&args.path)?;
    render_value(&setting.to_raw(), args.format)
}
