use crate::cli::{Cli, USAGE};
use crate::error::{CliError, CliResult};
use toolregistry::{MetadataInput, RegistryConfig, RegistryUpdater, UpdateReport, UpdateRequest};

/// Build the updater configuration: defaults, then environment, then flags
pub fn config_from_cli(cli: &Cli) -> RegistryConfig {
    let config = RegistryConfig::from_env();
    match &cli.registry {
        Some(path) => config.with_registry_path(path),
        None => config,
    }
}

/// Validate the arguments and upsert the entry
pub fn run_update(cli: &Cli) -> CliResult<UpdateReport> {
    let args = cli.tool_args().ok_or_else(|| CliError::usage(USAGE))?;
    if !cli.ignored.is_empty() {
        tracing::debug!("Ignoring extra arguments: {:?}", cli.ignored);
    }
    let config = config_from_cli(cli);

    let metadata = MetadataInput::from_env_var(args.tool_metadata_json, &config.metadata_env_var);
    let request = UpdateRequest::new(args.tool_id, args.tool_version).with_metadata(metadata);

    let report = RegistryUpdater::new(config).update(&request)?;
    tracing::info!(
        "Registered {}@{} in {} ({} tools)",
        report.entry.id(),
        report.entry.version(),
        report.path.display(),
        report.tool_count
    );
    Ok(report)
}
