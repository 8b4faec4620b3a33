//! Error handling for the update-registry CLI
//!
//! Library errors are wrapped with the exit code they map to. Whatever the
//! failure, the user sees exactly one line on stderr.

use crate::exit_codes::{EXIT_FAILURE, EXIT_SUCCESS};
use std::error::Error;
use std::fmt;
use toolregistry::RegistryError;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Create a CLI error from another error with a specific exit code
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        let message = error.to_string();
        Self {
            message,
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// Missing or empty positional arguments
    pub fn usage(usage: &str) -> Self {
        Self::new(usage, EXIT_FAILURE)
    }

    /// Create a CLI error with the general failure exit code
    pub fn general<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::from_error(error, EXIT_FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<RegistryError> for CliError {
    fn from(error: RegistryError) -> Self {
        Self::general(error)
    }
}

/// The single diagnostic line printed for an error
pub fn error_line(error: &CliError) -> String {
    error.message.lines().next().unwrap_or_default().to_string()
}

/// Convert a CliResult to an exit code, printing one line to stderr on failure
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("{}", error_line(&e));
            e.exit_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error() {
        let error = CliError::usage("Usage: update-registry <toolId> <toolVersion>");
        assert_eq!(error.exit_code, EXIT_FAILURE);
        assert!(error.source().is_none());
        assert_eq!(error.to_string(), "Usage: update-registry <toolId> <toolVersion>");
    }

    #[test]
    fn test_registry_error_conversion_keeps_source() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: CliError = RegistryError::parse("registry.json", parse).into();

        assert_eq!(error.exit_code, EXIT_FAILURE);
        assert!(error.message.starts_with("Failed to parse registry.json as JSON: "));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_line_is_first_line_only() {
        let error = CliError::new("first\nsecond", EXIT_FAILURE);
        assert_eq!(error_line(&error), "first");
    }

    #[test]
    fn test_handle_cli_result_exit_codes() {
        assert_eq!(handle_cli_result::<()>(Ok(())), EXIT_SUCCESS);
        assert_eq!(
            handle_cli_result::<()>(Err(CliError::new("failed", EXIT_FAILURE))),
            EXIT_FAILURE
        );
    }
}
