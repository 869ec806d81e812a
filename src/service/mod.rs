// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: the record store and the default project service.

pub mod default_service;
pub mod record_store;

pub use default_service::{DefaultProjectService, ProjectServiceBuilder};
pub use record_store::{RecordStore, RECORD_FILE};
