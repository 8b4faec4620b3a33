//! The registry update pipeline
//!
//! [`RegistryUpdater::update`] loads (or defaults) the registry, repairs its
//! shape, resolves metadata, builds the entry, upserts it and writes the
//! whole document back. Nothing is written unless every earlier step
//! succeeded.

use crate::config::RegistryConfig;
use crate::entry::ToolEntry;
use crate::error::Result;
use crate::fs_utils::{FileSystem, StdFileSystem};
use crate::metadata::MetadataInput;
use crate::registry::{Registry, UpsertOutcome};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;

/// Source of the `updated_at` timestamp
pub trait Clock: Send + Sync {
    /// The current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A single upsert request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Tool identifier
    pub tool_id: String,
    /// Tool version
    pub tool_version: String,
    /// Unparsed metadata inputs
    pub metadata: MetadataInput,
}

impl UpdateRequest {
    /// Create a request with no metadata
    pub fn new(tool_id: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            tool_version: tool_version.into(),
            metadata: MetadataInput::default(),
        }
    }

    /// Attach metadata inputs
    pub fn with_metadata(mut self, metadata: MetadataInput) -> Self {
        self.metadata = metadata;
        self
    }
}

/// What an update did
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    /// Absolute path that was written
    pub path: PathBuf,
    /// Whether the registry file existed before the update
    pub created: bool,
    /// Whether the entry was appended or replaced, and where
    pub outcome: UpsertOutcome,
    /// Number of entries after the update
    pub tool_count: usize,
    /// The entry that was written
    pub entry: ToolEntry,
}

/// Applies upserts to a registry file
pub struct RegistryUpdater {
    config: RegistryConfig,
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RegistryUpdater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryUpdater")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RegistryUpdater {
    /// Create an updater backed by the real file system and clock
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            fs: Arc::new(StdFileSystem),
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a custom file system implementation
    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Use a custom clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Load the registry, or the default document if the file does not exist
    pub fn load(&self) -> Result<Registry> {
        let path = self.config.resolved_registry_path()?;
        self.load_from(&path).map(|(registry, _)| registry)
    }

    fn load_from(&self, path: &std::path::Path) -> Result<(Registry, bool)> {
        if !self.fs.exists(path) {
            tracing::debug!("{} does not exist, using default registry", path.display());
            return Ok((Registry::new(), false));
        }

        let content = self.fs.read_to_string(path)?;
        let registry = Registry::parse(&content, &self.config.registry_label())?;
        tracing::debug!(
            "Loaded registry version {} with {} tools from {}",
            registry.version(),
            registry.len(),
            path.display()
        );
        Ok((registry, true))
    }

    /// Upsert one entry and persist the registry
    pub fn update(&self, request: &UpdateRequest) -> Result<UpdateReport> {
        let path = self.config.resolved_registry_path()?;
        let (mut registry, existed) = self.load_from(&path)?;

        let metadata = request.metadata.resolve()?;
        let entry = ToolEntry::new(
            request.tool_id.as_str(),
            request.tool_version.as_str(),
            self.clock.now(),
            metadata.as_ref(),
        );

        let outcome = registry.upsert(entry.clone());
        tracing::debug!(
            "{} {}@{} at index {}",
            match outcome {
                UpsertOutcome::Inserted { .. } => "Inserted",
                UpsertOutcome::Replaced { .. } => "Replaced",
            },
            entry.id(),
            entry.version(),
            outcome.index()
        );

        let content = registry.to_pretty_json()?;
        self.fs.write(&path, &content)?;

        Ok(UpdateReport {
            path,
            created: !existed,
            outcome,
            tool_count: registry.len(),
            entry,
        })
    }
}
