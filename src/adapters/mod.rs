// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing storage backend implementations.
//!
//! This module contains concrete implementations of the `StorageBackend` port
//! defined in the ports layer.

pub mod filesystem;
pub mod memory;

pub use filesystem::{FileSystemStorage, DATA_ROOT_ENV};
pub use memory::InMemoryStorage;
