//! Logging setup for the CLI
//!
//! Logs go to stderr. The default level is `WARN` so a successful run prints
//! nothing; failures are reported by the error handler, not by the logger.

use tracing::Level;

/// Pick the maximum log level from the verbosity flags
pub fn log_level(verbose: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Install the global tracing subscriber
pub fn init_logging(verbose: bool, quiet: bool) {
    let result = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(verbose, quiet))
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("tracing init skipped: {e}");
    }
}
