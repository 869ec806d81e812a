// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validation and slug-keyed storage for token sale project configurations.
//!
//! A project configuration describes a token sale: identity, roadmap,
//! tokenomics, presale and public rounds, compliance settings and links. This
//! crate validates raw documents against the full nested schema and stores the
//! canonical records durably, one per slug.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Record types, the slug codec, the validator, errors
//! - **Ports**: The `StorageBackend` trait over a hierarchical byte store
//! - **Adapters**: Filesystem and in-memory storage backends
//! - **Service**: The record store and the project service built on top of it
//!
//! # Validation
//!
//! [`ConfigValidator::validate`](domain::ConfigValidator::validate) runs one
//! accumulating pass: structural checks and cross-field rules (round dates,
//! buy limits, total supply, allocation sum) all contribute violations, and a
//! typed record is only returned when there are none. The slug is lower-cased
//! and the ticker upper-cased along the way.
//!
//! # Storage
//!
//! Each record lives in a container named after its slug, as a single
//! pretty-printed `project.json`. Listing skips unreadable containers instead
//! of failing. Writes are last-write-wins.
//!
//! # Quick Start
//!
//! ```rust
//! use sale_factory::prelude::*;
//! use sale_factory::domain::demo::demo_document;
//!
//! # fn main() -> Result<()> {
//! let service = DefaultProjectService::builder()
//!     .with_in_memory_storage()
//!     .build()?;
//!
//! let saved = service.validate_and_save(demo_document())?;
//! let loaded = service.get_record(saved.slug.as_str())?;
//! assert_eq!(loaded["ticker"], "ATLAS");
//! assert_eq!(loaded["updatedAt"].as_str(), saved.updated_at.as_deref());
//!
//! service.delete_record("atlas-chain")?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{FileSystemStorage, InMemoryStorage};
    pub use crate::domain::{
        ConfigValidator, ErrorKind, ProjectConfig, ProjectService, ProjectSummary, Result, Slug,
        StoreError, ValidationError, Violation,
    };
    pub use crate::ports::StorageBackend;
    pub use crate::service::{DefaultProjectService, ProjectServiceBuilder, RecordStore};
}
