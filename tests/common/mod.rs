// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

use sale_factory::domain::demo::demo_document;
use sale_factory::service::DefaultProjectService;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Creates a service over a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep it
/// alive for the duration of the test.
#[allow(dead_code)]
pub fn filesystem_service() -> (TempDir, DefaultProjectService) {
    let temp = TempDir::new().unwrap();
    let service = DefaultProjectService::builder()
        .with_data_root(temp.path())
        .build()
        .unwrap();
    (temp, service)
}

/// Returns the demo document with its allocation percentages replaced.
#[allow(dead_code)]
pub fn with_allocations(percents: &[f64]) -> Value {
    let mut doc = demo_document();
    doc["tokenomics"]["allocations"] = percents
        .iter()
        .enumerate()
        .map(|(i, p)| json!({ "name": format!("bucket-{}", i), "percent": p }))
        .collect();
    doc
}

/// Returns the demo document under another slug and name.
#[allow(dead_code)]
pub fn named(slug: &str, name: &str) -> Value {
    let mut doc = demo_document();
    doc["slug"] = json!(slug);
    doc["name"] = json!(name);
    doc
}
