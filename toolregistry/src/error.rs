//! Error handling for the tool registry library
//!
//! Every failure in the update pipeline is terminal, so the error type is
//! deliberately flat: parse failures carry the label of the input that
//! could not be parsed and I/O failures carry the path involved.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the tool registry library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// IO operation failed outside of reading or writing the registry itself
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A JSON input could not be parsed
    #[error("Failed to parse {label} as JSON: {source}")]
    Parse {
        /// Human readable name of the input, e.g. `registry.json`
        label: String,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// The registry file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path of the registry file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The registry file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Path that was being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The in-memory registry could not be serialized
    #[error("Failed to serialize registry: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl RegistryError {
    /// Create a parse error for the given input label
    pub fn parse(label: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            label: label.into(),
            source,
        }
    }

    /// Returns the label of the input that failed to parse, if this is a parse error
    pub fn parse_label(&self) -> Option<&str> {
        match self {
            Self::Parse { label, .. } => Some(label),
            _ => None,
        }
    }
}

/// Result type alias for tool registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_its_source() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = RegistryError::parse("registry.json", source);

        let message = error.to_string();
        assert!(message.starts_with("Failed to parse registry.json as JSON: "));
        assert_eq!(error.parse_label(), Some("registry.json"));
    }

    #[test]
    fn test_io_errors_name_the_path() {
        let error = RegistryError::Write {
            path: PathBuf::from("out/registry.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(error.to_string(), "Failed to write out/registry.json: denied");
        assert_eq!(error.parse_label(), None);
    }

    #[test]
    fn test_error_messages_are_single_line() {
        let source = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let error = RegistryError::parse("tool metadata argument", source);
        assert!(!error.to_string().contains('\n'));
    }
}
