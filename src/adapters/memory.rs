// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage adapter.
//!
//! Keeps containers and files in a map behind a lock. Useful for tests and for
//! embedding the store where no durable storage is wanted.

use crate::domain::{Result, StoreError};
use crate::ports::StorageBackend;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const BACKEND_NAME: &str = "memory";

type Containers = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

/// Storage backend that lives entirely in process memory.
///
/// # Examples
///
/// ```rust
/// use sale_factory::adapters::InMemoryStorage;
/// use sale_factory::ports::StorageBackend;
///
/// let storage = InMemoryStorage::new();
/// storage.create_container("atlas-chain").unwrap();
/// storage.write_file("atlas-chain", "project.json", b"{}").unwrap();
/// assert_eq!(storage.list_containers().unwrap(), vec!["atlas-chain"]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    containers: RwLock<Containers>,
}

impl InMemoryStorage {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `data` at `container/file`, creating the container if needed.
    ///
    /// **Note**: This bypasses the record store and is intended for seeding
    /// tests with arbitrary (including corrupt) content.
    pub fn with_file(self, container: &str, file: &str, data: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut containers) = self.containers.write() {
            containers
                .entry(container.to_string())
                .or_default()
                .insert(file.to_string(), data.into());
        }
        self
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Containers>> {
        self.containers.read().map_err(|_| poisoned())
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Containers>> {
        self.containers.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> StoreError {
    StoreError::StorageError {
        backend: BACKEND_NAME.to_string(),
        message: "Storage lock poisoned".to_string(),
        source: None,
    }
}

impl StorageBackend for InMemoryStorage {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn list_containers(&self) -> Result<Vec<String>> {
        Ok(self.read_guard()?.keys().cloned().collect())
    }

    fn create_container(&self, container: &str) -> Result<()> {
        self.write_guard()?
            .entry(container.to_string())
            .or_default();
        Ok(())
    }

    fn read_file(&self, container: &str, file: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .read_guard()?
            .get(container)
            .and_then(|files| files.get(file))
            .cloned())
    }

    fn write_file(&self, container: &str, file: &str, data: &[u8]) -> Result<()> {
        let mut containers = self.write_guard()?;
        let files = containers
            .get_mut(container)
            .ok_or_else(|| StoreError::StorageError {
                backend: BACKEND_NAME.to_string(),
                message: format!("Container does not exist: {}", container),
                source: None,
            })?;
        files.insert(file.to_string(), data.to_vec());
        Ok(())
    }

    fn remove_container(&self, container: &str) -> Result<()> {
        self.write_guard()?.remove(container);
        Ok(())
    }
}
