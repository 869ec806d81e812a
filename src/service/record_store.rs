// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slug-keyed record store.
//!
//! Each project record lives in its own container named after its slug, as a
//! single pretty-printed JSON file. Every operation normalizes the slug before
//! the backend is touched.

use crate::domain::{ProjectConfig, ProjectSummary, Result, Slug, StoreError};
use crate::ports::StorageBackend;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Name of the record file inside each container.
pub const RECORD_FILE: &str = "project.json";

/// The only fields `list` reads from a stored record.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHeader {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

/// Returns the current time as an RFC 3339 UTC timestamp with milliseconds,
/// e.g. `2024-05-05T12:00:00.000Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Durable storage for project records, one container per slug.
///
/// There is no locking and no version check: concurrent writers to the same
/// slug race and the last completed write wins.
///
/// # Examples
///
/// ```rust
/// use sale_factory::adapters::InMemoryStorage;
/// use sale_factory::domain::{ConfigValidator, ErrorKind};
/// use sale_factory::domain::demo::demo_document;
/// use sale_factory::service::RecordStore;
///
/// # fn main() -> sale_factory::domain::Result<()> {
/// let store = RecordStore::new(Box::new(InMemoryStorage::new()));
///
/// let mut config = ConfigValidator::validate(&demo_document())?;
/// store.write(&mut config)?;
///
/// let stored = store.read("atlas-chain")?;
/// assert_eq!(stored["ticker"], "ATLAS");
/// assert_eq!(stored["updatedAt"].as_str(), config.updated_at.as_deref());
///
/// store.delete("atlas-chain")?;
/// assert_eq!(store.read("atlas-chain").unwrap_err().kind(), ErrorKind::NotFound);
/// # Ok(())
/// # }
/// ```
pub struct RecordStore {
    storage: Box<dyn StorageBackend>,
}

impl RecordStore {
    /// Creates a store over `storage`.
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Returns the name of the underlying backend.
    pub fn backend_name(&self) -> &str {
        self.storage.name()
    }

    /// Lists a summary of every readable record.
    ///
    /// Only `name` and `updatedAt` are read from each record, so a record that
    /// has drifted from the current schema is still listed. Containers whose
    /// name is not a canonical slug, that have no record file, whose record is
    /// not JSON, or that lack a name or `updatedAt` are skipped with a
    /// warning. Only a failure to enumerate the root itself is returned as an
    /// error. Order follows the backend's enumeration.
    pub fn list(&self) -> Result<Vec<ProjectSummary>> {
        let containers = self.storage.list_containers()?;
        let mut summaries = Vec::with_capacity(containers.len());

        for container in containers {
            let slug = match Slug::parse(&container) {
                Ok(slug) if slug.as_str() == container => slug,
                Ok(_) => {
                    tracing::warn!("Skipping non-canonical container '{}'", container);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Skipping container '{}': {}", container, e);
                    continue;
                }
            };

            let bytes = match self.storage.read_file(&container, RECORD_FILE) {
                Ok(Some(bytes)) => bytes,
                Ok(None) => {
                    tracing::debug!("Container '{}' has no {}", container, RECORD_FILE);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Skipping container '{}': {}", container, e);
                    continue;
                }
            };

            let header: StoredHeader = match serde_json::from_slice(&bytes) {
                Ok(header) => header,
                Err(e) => {
                    tracing::warn!("Skipping unparseable record '{}': {}", container, e);
                    continue;
                }
            };

            match (header.name, header.updated_at) {
                (Some(name), Some(updated_at)) if !name.is_empty() && !updated_at.is_empty() => {
                    summaries.push(ProjectSummary {
                        slug,
                        name,
                        updated_at,
                    });
                }
                _ => {
                    tracing::warn!("Skipping record '{}' without name or updatedAt", container);
                }
            }
        }

        tracing::debug!(
            "Listed {} record(s) from '{}'",
            summaries.len(),
            self.storage.name()
        );
        Ok(summaries)
    }

    /// Reads the stored record for `slug` as-is.
    ///
    /// The document is returned exactly as stored, without re-validating it
    /// against the schema. Records written by an older schema or edited by
    /// hand come back unchanged.
    ///
    /// # Errors
    ///
    /// * `InvalidIdentifier` - `slug` does not normalize
    /// * `NotFound` - no record file exists for the slug
    /// * `StorageError` - the backend failed or the file is not JSON
    pub fn read(&self, slug: &str) -> Result<Value> {
        let slug = Slug::parse(slug)?;

        let bytes = self
            .storage
            .read_file(slug.as_str(), RECORD_FILE)?
            .ok_or_else(|| StoreError::NotFound {
                slug: slug.to_string(),
            })?;

        tracing::debug!("Read record '{}' ({} bytes)", slug, bytes.len());

        serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::storage(
                self.storage.name(),
                format!("Failed to parse record: {}", slug),
                e,
            )
        })
    }

    /// Stores `config`, replacing any previous record for its slug.
    ///
    /// `updatedAt` is always set to now; `createdAt` only if absent. Both are
    /// written back into `config` so the caller holds what was persisted.
    pub fn write(&self, config: &mut ProjectConfig) -> Result<()> {
        let slug = Slug::parse(config.slug.as_str())?;

        let now = timestamp_now();
        if config.created_at.as_deref().map_or(true, str::is_empty) {
            config.created_at = Some(now.clone());
        }
        config.updated_at = Some(now);
        config.slug = slug.clone();

        let payload = serde_json::to_vec_pretty(&*config).map_err(|e| {
            StoreError::storage(
                self.storage.name(),
                format!("Failed to serialize record: {}", slug),
                e,
            )
        })?;

        self.storage.create_container(slug.as_str())?;
        self.storage.write_file(slug.as_str(), RECORD_FILE, &payload)?;

        tracing::debug!("Wrote record '{}' ({} bytes)", slug, payload.len());
        Ok(())
    }

    /// Removes the record for `slug` and its whole container.
    ///
    /// Deleting a slug that was never written is not an error.
    pub fn delete(&self, slug: &str) -> Result<()> {
        let slug = Slug::parse(slug)?;
        self.storage.remove_container(slug.as_str())?;
        tracing::debug!("Deleted record '{}'", slug);
        Ok(())
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("backend", &self.storage.name())
            .finish()
    }
}
