//! File system abstraction for registry persistence
//!
//! The updater never touches `std::fs` directly. Going through the
//! [`FileSystem`] trait keeps the pipeline testable with an in-memory
//! implementation and keeps the atomic write logic in one place.

use crate::error::{RegistryError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Trait for file system operations
pub trait FileSystem: Send + Sync {
    /// Read a file to string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write string content to a file atomically, replacing any previous content
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;
}

/// Production file system implementation using std::fs
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Sibling path used to stage a write before it is renamed into place
    fn temp_path(path: &Path) -> PathBuf {
        let mut file_name = path.file_name().map(OsString::from).unwrap_or_default();
        file_name.push(".tmp");
        path.with_file_name(file_name)
    }

    /// The file a write should land in; symlinks are followed to their target
    fn write_target(path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Ok(path.to_path_buf());
        }
        std::fs::canonicalize(path).map_err(|source| RegistryError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let target = Self::write_target(path)?;
        let path = target.as_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| RegistryError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp_path = Self::temp_path(path);
        std::fs::write(&temp_path, content).map_err(|source| RegistryError::Write {
            path: temp_path.clone(),
            source,
        })?;

        std::fs::rename(&temp_path, path).map_err(|source| {
            let _ = std::fs::remove_file(&temp_path);
            RegistryError::Write {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::trace!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
