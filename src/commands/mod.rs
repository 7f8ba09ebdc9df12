//! Command implementations for yamlsettings.
//!
//! `dispatch` builds a [`Settings`] root from the source arguments and routes
//! the command to its handler. Handlers render to a `String` so they can be
//! tested without capturing stdout.

mod check;
mod dump;
mod get;
mod keys;


use crate::cli::{Cli, Command, OutputFormat, SourceArgs};
use yamlsettings::error::{Result, SettingsError};
use yamlsettings::{LoadOptions, Loader, RawValue, Settings, SourceSpec, YamlParser};

/// Dispatch a command to its implementation and print its output.
pub fn dispatch(cli: Cli) -> Result<()> {
    let settings = settings_from_args(&cli.source);

    let output = match cli.command {
        Command::Get(args) => get::cmd_get(&settings, &args)?,
        Command::Dump(args) => dump::cmd_dump(&settings, &args)?,
        Command::Keys(args) => keys::cmd_keys(&settings, &args)?,
        Command::Check => check::cmd_check(&settings)?,
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Build an unloaded settings root from CLI source arguments.
pub(crate) fn settings_from_args(args: &SourceArgs) -> Settings {
    let loader = Loader::new(YamlParser {
        expand_templates: !args.no_templates,
    });
    let options = LoadOptions {
        drop_nulls: args.drop_nulls,
        ..LoadOptions::default()
    };

    let mut builder = Settings::builder()
        .source(SourceSpec::Paths(args.files.clone()))
        .options(options)
        .loader(loader);
    if let Some(namespace) = &args.namespace {
        builder = builder.namespace(namespace.clone());
    }
    builder.build()
}

/// Render a value: scalars as plain text, everything else as a document.
pub(crate) fn render_value(value: &RawValue, format: OutputFormat) -> Result<String> {
    match value {
        RawValue::String(s) => Ok(s.clone()),
        RawValue::Number(n) => Ok(n.to_string()),
        RawValue::Bool(b) => Ok(b.to_string()),
        RawValue::Null => Ok("null".to_string()),
        RawValue::Sequence(_) | RawValue::Mapping(_) => render_document(value, format),
    }
}

/// Render a value as a full YAML or JSON document.
pub(crate) fn render_document(value: &RawValue, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| SettingsError::UserError(format!("failed to render YAML: {}", e))),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| SettingsError::UserError(format!("failed to render JSON: {}", e))),
    }
}
