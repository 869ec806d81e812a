// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the project store.
//!
//! This module defines the errors raised by the slug codec, the configuration
//! validator and the record store. All errors use `thiserror` for proper error
//! handling and conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The reason a raw identifier was rejected by the slug codec.
///
/// Each variant names the first rule that failed. The codec never returns a
/// partially normalized slug alongside one of these.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidSlug {
    /// The raw value was not a string.
    #[error("Slug must be a string.")]
    NotAString,

    /// The value was empty after trimming.
    #[error("Slug is invalid.")]
    Empty,

    /// The value contained a `..` traversal sequence.
    #[error("Slug is invalid.")]
    Traversal,

    /// The value contained `/` or `\`.
    #[error("Slug cannot contain path separators.")]
    PathSeparator,

    /// The value contained characters outside `[a-z0-9-]` after lower-casing.
    #[error("Slug must be lowercase and dash-safe.")]
    DisallowedCharacters,
}

/// One segment of a violation path: an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// A position in an array.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A single schema violation found in a project document.
///
/// # Examples
///
/// ```
/// use sale_factory::domain::errors::Violation;
///
/// let violation = Violation::new(
///     vec!["rounds".into(), "preSales".into(), 0usize.into(), "start".into()],
///     "Round start must be before end.",
/// );
/// assert_eq!(violation.dotted_path(), "rounds.preSales.0.start");
/// assert_eq!(violation.field(), Some("start"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Location of the offending value, from the document root.
    pub path: Vec<PathSegment>,
    /// Human readable description suitable for display next to a form field.
    pub message: String,
}

impl Violation {
    /// Creates a violation at `path`.
    pub fn new(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Returns the path joined with dots, e.g. `tokenomics.allocations`.
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Returns the last object key on the path, if any.
    pub fn field(&self) -> Option<&str> {
        self.path.iter().rev().find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.dotted_path(), self.message)
    }
}

/// The complete set of violations produced by one validation pass.
///
/// Never empty when returned as an error.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Project config is invalid ({} violation(s))", .violations.len())]
pub struct ValidationError {
    /// Every violation found, in document order.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns true if any violation's last key equals `field`.
    pub fn has_violation_at(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field() == Some(field))
    }
}

/// The four failure categories exposed to the request layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed identifier.
    InvalidIdentifier,
    /// Schema or cross-field violations.
    Validation,
    /// No record stored under the identifier.
    NotFound,
    /// Unclassified backing-store failure.
    Io,
}

/// The main error type for project store operations.
///
/// This enum represents every failure the validator and the record store can
/// raise. It is marked as `#[non_exhaustive]` to allow for future additions
/// without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use sale_factory::domain::errors::{ErrorKind, StoreError};
///
/// let error = StoreError::NotFound {
///     slug: "atlas-chain".to_string(),
/// };
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// assert_eq!(error.status_code(), 404);
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The identifier failed slug normalization.
    #[error("Invalid slug: {0}")]
    InvalidIdentifier(#[from] InvalidSlug),

    /// The document failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record exists for the slug.
    #[error("Project {slug} not found.")]
    NotFound {
        /// The normalized slug that was looked up
        slug: String,
    },

    /// The storage backend reported a failure.
    #[error("Storage backend '{backend}' error: {message}")]
    StorageError {
        /// The name of the backend that failed
        backend: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while touching the storage root.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a `StorageError` for `backend` wrapping `source`.
    pub fn storage<E>(backend: &str, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::StorageError {
            backend: backend.to_string(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::StorageError { .. } | StoreError::IoError(_) => ErrorKind::Io,
        }
    }

    /// Returns the wire error code used by the request layer.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidIdentifier => "INVALID_SLUG",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Io => "IO_ERROR",
        }
    }

    /// Returns the HTTP status the request layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidIdentifier | ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Io => 500,
        }
    }
}

/// A specialized Result type for project store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
