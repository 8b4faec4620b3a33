//! # Tool Registry
//!
//! Maintains a flat JSON registry of build tools, each entry keyed by an
//! `(id, version)` pair.
//!
//! ## Features
//!
//! - **Upsert**: replace the entry with the same key in place, or append a new one
//! - **Shape repair**: malformed `version` / `tools` fields fall back to defaults
//! - **Metadata merge**: arbitrary caller metadata, never overriding `id`, `version` or `updated_at`
//! - **Atomic writes**: the registry is staged to a temporary file and renamed into place
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use toolregistry::{MetadataInput, RegistryConfig, RegistryUpdater, UpdateRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let updater = RegistryUpdater::new(RegistryConfig::from_env());
//! let request = UpdateRequest::new("formatter", "2.1.0")
//!     .with_metadata(MetadataInput::from_argument(r#"{"channel": "stable"}"#));
//!
//! let report = updater.update(&request)?;
//! println!("{} tools registered", report.tool_count);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Updater configuration
pub mod config;

/// Registry entries and timestamp formatting
pub mod entry;

/// Error types
pub mod error;

/// File system abstraction
pub mod fs_utils;

/// Tool metadata resolution
pub mod metadata;

/// The registry document model
pub mod registry;

/// The load, upsert and persist pipeline
pub mod updater;

pub use config::{RegistryConfig, DEFAULT_REGISTRY_FILE};
pub use entry::{format_timestamp, ToolEntry};
pub use error::{RegistryError, Result};
pub use fs_utils::{FileSystem, StdFileSystem};
pub use metadata::{MetadataInput, MetadataSource, METADATA_ENV_VAR};
pub use registry::{Registry, UpsertOutcome, DEFAULT_REGISTRY_VERSION};
pub use updater::{Clock, FixedClock, RegistryUpdater, SystemClock, UpdateReport, UpdateRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
