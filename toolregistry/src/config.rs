//! Configuration for the registry updater
//!
//! Defaults match what a build pipeline expects (`registry.json` in the
//! working directory, metadata in `TOOL_METADATA_JSON`). Environment
//! variables with the `TOOL_REGISTRY` prefix override the defaults and
//! command line flags override both.

use crate::error::Result;
use crate::metadata::METADATA_ENV_VAR;
use std::env;
use std::path::{Path, PathBuf};

/// Default registry file name, resolved against the working directory
pub const DEFAULT_REGISTRY_FILE: &str = "registry.json";

/// Prefix shared by all configuration environment variables
pub const ENV_PREFIX: &str = "TOOL_REGISTRY";

/// Loads prefixed environment variables, treating empty values as unset
#[derive(Debug)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Full variable name for `suffix`
    pub fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Load a value, `None` when unset or empty
    pub fn load_optional(&self, suffix: &str) -> Option<String> {
        env::var(self.key(suffix)).ok().filter(|v| !v.is_empty())
    }
}

/// Configuration settings for a registry update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Registry file; relative paths are resolved against the working directory
    pub registry_path: PathBuf,
    /// Environment variable holding fallback metadata
    pub metadata_env_var: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from(DEFAULT_REGISTRY_FILE),
            metadata_env_var: METADATA_ENV_VAR.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Defaults overridden by `TOOL_REGISTRY_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_vars();
        config
    }

    fn apply_env_vars(&mut self) {
        let loader = EnvLoader::new(ENV_PREFIX);
        if let Some(path) = loader.load_optional("PATH") {
            tracing::debug!("Using registry path from {}: {}", loader.key("PATH"), path);
            self.registry_path = PathBuf::from(path);
        }
    }

    /// Replace the registry path
    pub fn with_registry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_path = path.into();
        self
    }

    /// Name used for the registry in error messages
    pub fn registry_label(&self) -> String {
        self.registry_path.display().to_string()
    }

    /// Absolute registry path, resolved against the current working directory
    pub fn resolved_registry_path(&self) -> Result<PathBuf> {
        Ok(resolve_against(&env::current_dir()?, &self.registry_path))
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
