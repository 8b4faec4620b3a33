//! Tool metadata resolution
//!
//! Metadata arrives either as a positional argument or through the
//! `TOOL_METADATA_JSON` environment variable. The argument wins whenever it
//! is non-empty; an empty value in either place counts as absent.

use crate::error::{RegistryError, Result};
use serde_json::Value;

/// Environment variable consulted when no metadata argument is given
pub const METADATA_ENV_VAR: &str = "TOOL_METADATA_JSON";

const ARGUMENT_LABEL: &str = "tool metadata argument";

/// Where a piece of metadata came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    /// The positional command line argument
    Argument,
    /// The metadata environment variable
    Environment,
}

/// Raw, unparsed metadata inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataInput {
    /// Metadata passed directly by the caller
    pub argument: Option<String>,
    /// Value of the metadata environment variable, if set
    pub environment: Option<String>,
    env_var: Option<String>,
}

impl MetadataInput {
    /// Metadata supplied directly, with no environment fallback
    pub fn from_argument(argument: impl Into<String>) -> Self {
        Self {
            argument: Some(argument.into()),
            ..Self::default()
        }
    }

    /// Pair an optional argument with the current value of `TOOL_METADATA_JSON`
    pub fn from_env(argument: Option<String>) -> Self {
        Self::from_env_var(argument, METADATA_ENV_VAR)
    }

    /// Pair an optional argument with the current value of `env_var`
    pub fn from_env_var(argument: Option<String>, env_var: &str) -> Self {
        Self {
            argument,
            environment: std::env::var(env_var).ok(),
            env_var: Some(env_var.to_string()),
        }
    }

    /// The raw text that will be parsed, and where it came from
    pub fn selected(&self) -> Option<(MetadataSource, &str)> {
        non_empty(&self.argument)
            .map(|raw| (MetadataSource::Argument, raw))
            .or_else(|| non_empty(&self.environment).map(|raw| (MetadataSource::Environment, raw)))
    }

    /// Label used in parse errors for `source`
    pub fn label(&self, source: MetadataSource) -> String {
        match source {
            MetadataSource::Argument => ARGUMENT_LABEL.to_string(),
            MetadataSource::Environment => format!(
                "{} env var",
                self.env_var.as_deref().unwrap_or(METADATA_ENV_VAR)
            ),
        }
    }

    /// Parse the selected metadata, returning `None` when there is none
    pub fn resolve(&self) -> Result<Option<Value>> {
        let Some((source, raw)) = self.selected() else {
            tracing::debug!("No tool metadata supplied");
            return Ok(None);
        };

        tracing::debug!("Parsing tool metadata from {:?}", source);
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| RegistryError::parse(self.label(source), e))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
