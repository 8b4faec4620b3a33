use clap::Parser;
use std::path::PathBuf;

/// One-line usage shown when a required argument is missing
pub const USAGE: &str = "Usage: update-registry <toolId> <toolVersion> [<toolMetadataJson>]";

#[derive(Parser, Debug)]
#[command(name = "update-registry")]
#[command(version)]
#[command(about = "Record a tool version in a JSON tool registry")]
#[command(long_about = "
update-registry inserts or replaces one entry in a JSON tool registry.
Entries are keyed by (toolId, toolVersion): an existing entry with the
same key is replaced in place, otherwise the entry is appended.

Metadata is a JSON object merged into the entry. When the metadata
argument is omitted, TOOL_METADATA_JSON is used instead. The id, version
and updated_at fields are always set by the tool.

The registry defaults to registry.json in the working directory and can
be changed with --registry or TOOL_REGISTRY_PATH.

Options must come before the positional arguments; anything after the
tool id is taken as a value, even when it starts with '-'.

Example usage:
  update-registry formatter 2.1.0
  update-registry formatter 2.1.0 '{\"channel\": \"stable\"}'
  TOOL_METADATA_JSON='{\"arch\": \"x86_64\"}' update-registry linter 0.9.0
")]
pub struct Cli {
    /// Tool identifier
    #[arg(value_name = "TOOL_ID", allow_hyphen_values = true)]
    pub tool_id: Option<String>,

    /// Tool version
    #[arg(value_name = "TOOL_VERSION", allow_hyphen_values = true)]
    pub tool_version: Option<String>,

    /// JSON object with extra fields for the entry
    #[arg(value_name = "TOOL_METADATA_JSON", allow_hyphen_values = true)]
    pub tool_metadata_json: Option<String>,

    /// Trailing arguments past the metadata are accepted and ignored
    #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,

    /// Registry file to update (default: registry.json)
    #[arg(long, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Positional arguments after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolArgs {
    pub tool_id: String,
    pub tool_version: String,
    pub tool_metadata_json: Option<String>,
}

impl Cli {
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    /// The tool id and version, or `None` if either is missing or empty
    pub fn tool_args(&self) -> Option<ToolArgs> {
        let present = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        Some(ToolArgs {
            tool_id: present(&self.tool_id)?,
            tool_version: present(&self.tool_version)?,
            tool_metadata_json: self.tool_metadata_json.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_help_works() {
        let result = Cli::try_parse_from_args(["update-registry", "--help"]);
        assert!(result.is_err()); // Help exits with error code but that's expected

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_works() {
        let result = Cli::try_parse_from_args(["update-registry", "--version"]);
        assert!(result.is_err());

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_no_arguments_parses_but_is_incomplete() {
        let cli = Cli::try_parse_from_args(["update-registry"]).unwrap();
        assert!(cli.tool_id.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert_eq!(cli.tool_args(), None);
    }

    #[test]
    fn test_cli_missing_version_is_incomplete() {
        let cli = Cli::try_parse_from_args(["update-registry", "formatter"]).unwrap();
        assert_eq!(cli.tool_args(), None);
    }

    #[test]
    fn test_cli_empty_values_are_incomplete() {
        let cli = Cli::try_parse_from_args(["update-registry", "", "1.0"]).unwrap();
        assert_eq!(cli.tool_args(), None);

        let cli = Cli::try_parse_from_args(["update-registry", "formatter", ""]).unwrap();
        assert_eq!(cli.tool_args(), None);
    }

    #[test]
    fn test_cli_all_positionals() {
        let cli = Cli::try_parse_from_args([
            "update-registry",
            "formatter",
            "2.1.0",
            r#"{"channel": "stable"}"#,
        ])
        .unwrap();

        assert_eq!(
            cli.tool_args(),
            Some(ToolArgs {
                tool_id: "formatter".to_string(),
                tool_version: "2.1.0".to_string(),
                tool_metadata_json: Some(r#"{"channel": "stable"}"#.to_string()),
            })
        );
    }

    #[test]
    fn test_cli_registry_and_logging_flags() {
        let cli = Cli::try_parse_from_args([
            "update-registry",
            "--registry",
            "build/tools.json",
            "-v",
            "formatter",
            "2.1.0",
        ])
        .unwrap();

        assert_eq!(cli.registry, Some(PathBuf::from("build/tools.json")));
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert_eq!(cli.tool_args().unwrap().tool_metadata_json, None);
    }

    #[test]
    fn test_cli_ignores_extra_positionals() {
        let cli =
            Cli::try_parse_from_args(["update-registry", "a", "1", "{}", "extra", "more"])
                .unwrap();

        let args = cli.tool_args().unwrap();
        assert_eq!(args.tool_metadata_json.as_deref(), Some("{}"));
        assert_eq!(cli.ignored, ["extra", "more"]);
    }

    #[test]
    fn test_cli_accepts_values_starting_with_hyphen() {
        let cli = Cli::try_parse_from_args(["update-registry", "a", "-rc1"]).unwrap();
        assert_eq!(cli.tool_args().unwrap().tool_version, "-rc1");

        let cli = Cli::try_parse_from_args(["update-registry", "a", "1", "-5"]).unwrap();
        assert_eq!(cli.tool_args().unwrap().tool_metadata_json.as_deref(), Some("-5"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_flags_before_positionals_still_parse() {
        let cli = Cli::try_parse_from_args(["update-registry", "-q", "a", "-rc1"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.tool_args().unwrap().tool_id, "a");
    }
}
