//! Implementation of the `yamlsettings dump` command.

use super::render_document;
use crate::cli::DumpArgs;
use yamlsettings::error::Result;
use yamlsettings::{RawValue, Settings};

/// Render the whole merged mapping.
pub fn cmd_dump(settings: &Settings, args: &DumpArgs) -> Result<String> {
    let root = settings.root()?;
    render_document(&RawValue::Mapping(root.as_mapping().clone()), args.format)
}
