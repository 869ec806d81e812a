// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project service trait definition.
//!
//! This module defines the `ProjectService` trait, the interface a request layer
//! uses to list, read, save and delete project records. Implementations combine
//! the validator with a record store.

use crate::domain::{ProjectConfig, ProjectSummary, Result};
use serde_json::Value;

/// The collaborator contract exposed to request handlers.
///
/// Every method maps to one endpoint of the HTTP surface. Error
/// mapping to client-visible statuses is left to the caller, see
/// [`StoreError::status_code`](crate::domain::StoreError::status_code).
///
/// # Examples
///
/// ```rust
/// use sale_factory::domain::{ProjectConfig, ProjectService, ProjectSummary, Result, StoreError};
/// use serde_json::Value;
///
/// struct EmptyService;
///
/// impl ProjectService for EmptyService {
///     fn list_summaries(&self) -> Result<Vec<ProjectSummary>> {
///         Ok(vec![])
///     }
///
///     fn get_record(&self, slug: &str) -> Result<Value> {
///         Err(StoreError::NotFound { slug: slug.to_string() })
///     }
///
///     fn validate_and_save(&self, raw: Value) -> Result<ProjectConfig> {
///         unimplemented!()
///     }
///
///     fn delete_record(&self, slug: &str) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let service = EmptyService;
/// assert!(service.list_summaries().unwrap().is_empty());
/// assert!(service.get_record("atlas-chain").is_err());
/// ```
pub trait ProjectService {
    /// Lists `{slug, name, updatedAt}` for every readable stored record.
    ///
    /// Unreadable entries are skipped rather than reported.
    fn list_summaries(&self) -> Result<Vec<ProjectSummary>>;

    /// Returns the full stored record for `slug`, exactly as stored.
    ///
    /// The record is not re-validated, so it may predate the current schema.
    ///
    /// # Errors
    ///
    /// * `InvalidIdentifier` if `slug` does not normalize
    /// * `NotFound` if nothing is stored under it
    fn get_record(&self, slug: &str) -> Result<Value>;

    /// Validates a raw document and, if it is valid, stores it.
    ///
    /// Returns the canonical record as saved, timestamps included. On failure
    /// nothing is written and the error carries the full violation list.
    fn validate_and_save(&self, raw: Value) -> Result<ProjectConfig>;

    /// Removes the record for `slug`. Succeeds if it never existed.
    fn delete_record(&self, slug: &str) -> Result<()>;
}
