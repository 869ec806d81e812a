// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default project service implementation.
//!
//! This module provides the default implementation of the `ProjectService`
//! trait, which runs raw documents through the validator and persists the
//! canonical result in a record store.

use crate::adapters::{FileSystemStorage, InMemoryStorage};
use crate::domain::{
    ConfigValidator, ProjectConfig, ProjectService, ProjectSummary, Result, StoreError,
};
use crate::ports::StorageBackend;
use crate::service::record_store::{timestamp_now, RecordStore};
use serde_json::Value;
use std::path::PathBuf;

/// Default implementation of the project service.
///
/// # Examples
///
/// ```rust
/// use sale_factory::prelude::*;
/// use sale_factory::domain::demo::demo_document;
///
/// # fn main() -> Result<()> {
/// let service = DefaultProjectService::builder()
///     .with_in_memory_storage()
///     .build()?;
///
/// let saved = service.validate_and_save(demo_document())?;
/// assert_eq!(saved.ticker, "ATLAS");
/// assert_eq!(service.list_summaries()?.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DefaultProjectService {
    store: RecordStore,
}

impl DefaultProjectService {
    /// Creates a service storing records in `storage`.
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            store: RecordStore::new(storage),
        }
    }

    /// Creates a new service builder.
    pub fn builder() -> ProjectServiceBuilder {
        ProjectServiceBuilder::new()
    }

    /// Creates a service over the filesystem with the default root.
    ///
    /// The root is taken from `SALE_FACTORY_DATA_ROOT` if set, otherwise from
    /// the OS data directory for `app_name`.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn with_defaults(app_name: &str, qualifier: &str) -> Result<Self> {
        let storage = match FileSystemStorage::from_env() {
            Some(storage) => storage,
            None => FileSystemStorage::from_default_location(app_name, qualifier)?,
        };
        tracing::debug!("Project store rooted at {:?}", storage.root());
        Ok(Self::new(Box::new(storage)))
    }

    /// Returns the underlying record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

/// Fills `createdAt` when missing or blank and always refreshes `updatedAt`.
fn stamp(raw: &mut Value, now: &str) {
    if let Value::Object(map) = raw {
        let blank = match map.get("createdAt") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if blank {
            map.insert("createdAt".to_string(), Value::from(now));
        }
        map.insert("updatedAt".to_string(), Value::from(now));
    }
}

impl ProjectService for DefaultProjectService {
    fn list_summaries(&self) -> Result<Vec<ProjectSummary>> {
        self.store.list()
    }

    fn get_record(&self, slug: &str) -> Result<Value> {
        self.store.read(slug)
    }

    fn validate_and_save(&self, mut raw: Value) -> Result<ProjectConfig> {
        stamp(&mut raw, &timestamp_now());

        let mut config = ConfigValidator::validate(&raw).map_err(|e| {
            tracing::debug!("Rejected project document: {}", e);
            StoreError::from(e)
        })?;

        self.store.write(&mut config)?;
        Ok(config)
    }

    fn delete_record(&self, slug: &str) -> Result<()> {
        self.store.delete(slug)
    }
}

/// Builder for constructing a `DefaultProjectService`.
///
/// # Examples
///
/// ```rust,no_run
/// use sale_factory::service::ProjectServiceBuilder;
///
/// # fn main() -> sale_factory::domain::Result<()> {
/// let service = ProjectServiceBuilder::new()
///     .with_data_root("/var/lib/sale-factory")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ProjectServiceBuilder {
    storage: Option<Box<dyn StorageBackend>>,
}

impl ProjectServiceBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `storage` as the backend.
    pub fn with_storage(mut self, storage: Box<dyn StorageBackend>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Stores records on the filesystem under `root`.
    pub fn with_data_root(self, root: impl Into<PathBuf>) -> Self {
        self.with_storage(Box::new(FileSystemStorage::new(root)))
    }

    /// Stores records in process memory.
    pub fn with_in_memory_storage(self) -> Self {
        self.with_storage(Box::new(InMemoryStorage::new()))
    }

    /// Builds the service.
    ///
    /// Without an explicit backend, falls back to the filesystem root named by
    /// `SALE_FACTORY_DATA_ROOT`, and fails if that is unset.
    pub fn build(self) -> Result<DefaultProjectService> {
        let storage = match self.storage {
            Some(storage) => storage,
            None => match FileSystemStorage::from_env() {
                Some(storage) => Box::new(storage) as Box<dyn StorageBackend>,
                None => {
                    return Err(StoreError::StorageError {
                        backend: "none".to_string(),
                        message: "No storage backend configured".to_string(),
                        source: None,
                    })
                }
            },
        };

        Ok(DefaultProjectService::new(storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demo::demo_document;
    use crate::domain::ErrorKind;
    use serde_json::json;

    fn service() -> DefaultProjectService {
        DefaultProjectService::builder()
            .with_in_memory_storage()
            .build()
            .unwrap()
    }

    #[test]
    fn test_stamp_fills_missing_created_at() {
        let mut raw = json!({ "name": "x" });
        stamp(&mut raw, "2024-01-01T00:00:00.000Z");
        assert_eq!(raw["createdAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(raw["updatedAt"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_stamp_keeps_existing_created_at() {
        let mut raw = json!({ "createdAt": "2023-01-01T00:00:00.000Z", "updatedAt": "old" });
        stamp(&mut raw, "2024-01-01T00:00:00.000Z");
        assert_eq!(raw["createdAt"], "2023-01-01T00:00:00.000Z");
        assert_eq!(raw["updatedAt"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_stamp_replaces_blank_created_at() {
        let mut raw = json!({ "createdAt": "" });
        stamp(&mut raw, "now");
        assert_eq!(raw["createdAt"], "now");
    }

    #[test]
    fn test_stamp_ignores_non_objects() {
        let mut raw = json!("not a document");
        stamp(&mut raw, "now");
        assert_eq!(raw, json!("not a document"));
    }

    #[test]
    fn test_validate_and_save_returns_canonical_record() {
        let service = service();
        let saved = service.validate_and_save(demo_document()).unwrap();

        assert_eq!(saved.slug.as_str(), "atlas-chain");
        assert_eq!(saved.ticker, "ATLAS");
        assert_eq!(saved.created_at.as_deref(), Some("2024-04-15T12:00:00.000Z"));
        assert_eq!(
            service.get_record("atlas-chain").unwrap(),
            serde_json::to_value(&saved).unwrap()
        );
    }

    #[test]
    fn test_validate_and_save_rejects_without_writing() {
        let service = service();
        let mut doc = demo_document();
        doc["tokenomics"]["allocations"][0]["percent"] = json!(95);

        let err = service.validate_and_save(doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        match err {
            StoreError::Validation(e) => assert!(e.has_violation_at("allocations")),
            other => panic!("unexpected error: {}", other),
        }
        assert!(service.list_summaries().unwrap().is_empty());
    }

    #[test]
    fn test_delete_record() {
        let service = service();
        service.validate_and_save(demo_document()).unwrap();
        service.delete_record("atlas-chain").unwrap();
        service.delete_record("atlas-chain").unwrap();
        assert_eq!(
            service.get_record("atlas-chain").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_builder_with_explicit_storage() {
        let service = ProjectServiceBuilder::new()
            .with_storage(Box::new(InMemoryStorage::new()))
            .build()
            .unwrap();
        assert_eq!(service.store().backend_name(), "memory");
    }

    #[test]
    fn test_builder_with_data_root() {
        let temp = tempfile::TempDir::new().unwrap();
        let service = ProjectServiceBuilder::new()
            .with_data_root(temp.path())
            .build()
            .unwrap();
        service.validate_and_save(demo_document()).unwrap();
        assert!(temp.path().join("atlas-chain").join("project.json").is_file());
    }
}
