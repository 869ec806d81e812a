// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module holds the project record types, the slug codec, the validator
//! and the error taxonomy. It does not touch storage.

pub mod demo;
pub mod errors;
pub mod project;
pub mod service;
pub mod slug;
pub mod validator;

// Re-export commonly used types
pub use errors::{ErrorKind, InvalidSlug, Result, StoreError, ValidationError, Violation};
pub use project::{
    Allocation, Compliance, Currency, Links, NumericValue, ProjectConfig, ProjectSummary,
    RoadmapItem, RoadmapStatus, Round, RoundKind, Rounds, Tokenomics,
};
pub use service::ProjectService;
pub use slug::Slug;
pub use validator::ConfigValidator;
