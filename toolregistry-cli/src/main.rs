use std::process;

use clap::error::ErrorKind;
use toolregistry_cli::cli::Cli;
use toolregistry_cli::error::{handle_cli_result, CliError};
use toolregistry_cli::exit_codes::EXIT_FAILURE;
use toolregistry_cli::{logging, update};

fn main() {
    let cli = match Cli::try_parse_from_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // clap renders several lines; keep the one that names the problem
            let message = e.to_string();
            process::exit(handle_cli_result::<()>(Err(CliError::new(
                message.trim_start_matches("error: "),
                EXIT_FAILURE,
            ))));
        }
    };

    logging::init_logging(cli.verbose, cli.quiet);
    tracing::debug!("Updating tool registry");

    let exit_code = handle_cli_result(update::run_update(&cli));
    process::exit(exit_code);
}
