// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem storage adapter.
//!
//! This module provides a backend that keeps one directory per container under
//! a root directory, with each file stored as a regular file inside it.

use crate::domain::{Result, StoreError};
use crate::ports::StorageBackend;
use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable naming the storage root.
pub const DATA_ROOT_ENV: &str = "SALE_FACTORY_DATA_ROOT";

/// Maximum size of a single stored file (10MB)
/// Anything larger is treated as corrupt rather than read into memory
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const BACKEND_NAME: &str = "filesystem";

/// Storage backend over a local directory tree.
///
/// The root directory is created on demand, before listing and before the
/// first container is created.
///
/// # Examples
///
/// ```rust,no_run
/// use sale_factory::adapters::FileSystemStorage;
///
/// // Explicit root
/// let storage = FileSystemStorage::new("/var/lib/sale-factory");
///
/// // OS data directory for the application
/// let storage = FileSystemStorage::from_default_location("sale-factory", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
}

impl FileSystemStorage {
    /// Creates a backend rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a backend rooted at the path in `SALE_FACTORY_DATA_ROOT`.
    ///
    /// Returns `None` if the variable is unset or blank.
    pub fn from_env() -> Option<Self> {
        let root = std::env::var_os(DATA_ROOT_ENV)?;
        if root.to_string_lossy().trim().is_empty() {
            return None;
        }
        tracing::debug!("Using storage root from {}: {:?}", DATA_ROOT_ENV, root);
        Some(Self::new(root))
    }

    /// Creates a backend rooted at the OS-appropriate data directory.
    ///
    /// This method uses the `directories` crate to determine the location.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "sale-factory")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| StoreError::StorageError {
                backend: BACKEND_NAME.to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Ok(Self::new(proj_dirs.data_dir().join("projects")))
    }

    /// Returns the storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn container_path(&self, container: &str) -> PathBuf {
        self.root.join(container)
    }

    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::storage(BACKEND_NAME, "Failed to create storage root", e)
        })
    }
}

impl StorageBackend for FileSystemStorage {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn list_containers(&self) -> Result<Vec<String>> {
        self.ensure_root()?;

        let entries = fs::read_dir(&self.root)
            .map_err(|e| StoreError::storage(BACKEND_NAME, "Failed to read storage root", e))?;

        let mut containers = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry in {:?}: {}", self.root, e);
                    continue;
                }
            };

            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => {}
                _ => continue,
            }

            match entry.file_name().into_string() {
                Ok(name) => containers.push(name),
                Err(name) => {
                    tracing::debug!("Skipping non UTF-8 container name: {:?}", name);
                }
            }
        }

        Ok(containers)
    }

    fn create_container(&self, container: &str) -> Result<()> {
        self.ensure_root()?;
        fs::create_dir_all(self.container_path(container)).map_err(|e| {
            StoreError::storage(
                BACKEND_NAME,
                format!("Failed to create container: {}", container),
                e,
            )
        })
    }

    fn read_file(&self, container: &str, file: &str) -> Result<Option<Vec<u8>>> {
        let path = self.container_path(container).join(file);

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::storage(
                    BACKEND_NAME,
                    format!("Failed to read file metadata: {}/{}", container, file),
                    e,
                ))
            }
        };

        if metadata.len() > MAX_FILE_SIZE {
            return Err(StoreError::StorageError {
                backend: BACKEND_NAME.to_string(),
                message: format!(
                    "File too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_FILE_SIZE
                ),
                source: None,
            });
        }

        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::storage(
                BACKEND_NAME,
                format!("Failed to read file: {}/{}", container, file),
                e,
            )),
        }
    }

    fn write_file(&self, container: &str, file: &str, data: &[u8]) -> Result<()> {
        let path = self.container_path(container).join(file);
        fs::write(&path, data).map_err(|e| {
            StoreError::storage(
                BACKEND_NAME,
                format!("Failed to write file: {}/{}", container, file),
                e,
            )
        })
    }

    fn remove_container(&self, container: &str) -> Result<()> {
        match fs::remove_dir_all(self.container_path(container)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::storage(
                BACKEND_NAME,
                format!("Failed to remove container: {}", container),
                e,
            )),
        }
    }
}
