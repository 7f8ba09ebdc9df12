//! CLI argument parsing for yamlsettings.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect layered YAML settings.
///
/// Settings files are deep-merged in the order given: later files win on
/// conflicting values, nested sections merge key by key.
#[derive(Parser, Debug)]
#[command(name = "yamlsettings")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Enable verbose logging (sets log level to DEBUG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Where settings are loaded from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Settings file to load; repeat to merge several (later files win).
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        env = "YAMLSETTINGS_FILES",
        value_delimiter = ',',
        global = true
    )]
    pub files: Vec<PathBuf>,

    /// Take only this top-level key from each file before merging.
    #[arg(
        short,
        long,
        value_name = "KEY",
        env = "YAMLSETTINGS_NAMESPACE",
        global = true
    )]
    pub namespace: Option<String>,

    /// Remove null values (and sections left empty) after merging.
    #[arg(long, global = true)]
    pub drop_nulls: bool,

    /// Do not expand ${VAR} references in settings files.
    ///
    /// Without this flag `$$` is read as an escaped `$`.
    #[arg(long, global = true)]
    pub no_templates: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value at a dotted path (e.g. `db.primary.host`).
    ///
    /// Scalars are printed as-is; sections and lists are printed as YAML or JSON.
    Get(GetArgs),

    /// Print the fully merged settings.
    Dump(DumpArgs),

    /// List the keys of the root or of a section.
    ///
    /// Keys that are not identifier-shaped are marked as lookup-only.
    Keys(KeysArgs),

    /// Load the settings and report whether they are usable.
    Check,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted path to look up.
    pub path: String,

    /// Output format for sections and lists.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Dotted path of the section to list (the root when omitted).
    pub path: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_files_keep_order() {
        let cli = Cli::try_parse_from([
            "yamlsettings",
            "-f",
            "a.yml",
            "--file",
            "b.yml",
            "get",
            "db.host",
        ])
        .unwrap();

        assert_eq!(
            cli.source.files,
            vec![PathBuf::from("a.yml"), PathBuf::from("b.yml")]
        );
        match cli.command {
            Command::Get(args) => {
                assert_eq!(args.path, "db.host");
                assert_eq!(args.format, OutputFormat::Yaml);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn comma_separated_files() {
        let cli = Cli::try_parse_from(["yamlsettings", "dump", "-f", "a.yml,b.yml"]).unwrap();
        assert_eq!(cli.source.files.len(), 2);
    }

    #[test]
    fn source_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "yamlsettings",
            "keys",
            "db",
            "--namespace",
            "production",
            "--drop-nulls",
        ])
        .unwrap();

        assert_eq!(cli.source.namespace.as_deref(), Some("production"));
        assert!(cli.source.drop_nulls);
        match cli.command {
            Command::Keys(args) => assert_eq!(args.path.as_deref(), Some("db")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn json_format() {
        let cli = Cli::try_parse_from(["yamlsettings", "dump", "--format", "json"]).unwrap();
        match cli.command {
            Command::Dump(args) => assert_eq!(args.format, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
