// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the sale-factory crate.
//!
//! This example demonstrates:
//! - Creating a project service over a data root
//! - Validating and saving the demo project
//! - Listing summaries and reading a record back
//! - Inspecting validation violations
//! - Deleting a record
//!
//! To run this example:
//! ```bash
//! # Optionally pick where records are stored
//! export SALE_FACTORY_DATA_ROOT="/tmp/sale-factory"
//!
//! # Run the example
//! cargo run --example basic_usage
//! ```

use sale_factory::domain::demo::demo_document;
use sale_factory::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== Sale Factory: Basic Usage ===\n");

    // Use the configured data root when set, a scratch directory otherwise
    let scratch = tempfile::TempDir::new()?;
    let service = match FileSystemStorage::from_env() {
        Some(storage) => DefaultProjectService::new(Box::new(storage)),
        None => DefaultProjectService::builder()
            .with_data_root(scratch.path())
            .build()?,
    };

    println!("Project service created.\n");

    // Example 1: Save the demo project
    println!("--- Example 1: Validate and Save ---");
    let saved = service.validate_and_save(demo_document())?;
    println!("✓ Saved '{}' as {}", saved.name, saved.slug);
    println!("  ticker:    {}", saved.ticker);
    println!("  createdAt: {}", saved.created_at.as_deref().unwrap_or("-"));
    println!("  updatedAt: {}", saved.updated_at.as_deref().unwrap_or("-"));

    // Example 2: List what is stored
    println!("\n--- Example 2: List Summaries ---");
    for summary in service.list_summaries()? {
        println!("  {} | {} | {}", summary.slug, summary.name, summary.updated_at);
    }

    // Example 3: Read a record back, slug lookup is case-insensitive
    println!("\n--- Example 3: Read Record ---");
    let loaded = service.get_record("ATLAS-CHAIN")?;
    let round_count = |key: &str| loaded["rounds"][key].as_array().map_or(0, Vec::len);
    println!(
        "✓ {} has {} presale round(s) and {} public round(s)",
        loaded["name"].as_str().unwrap_or("-"),
        round_count("preSales"),
        round_count("publicSales")
    );
    println!("  allocated: {}%", saved.tokenomics.allocated_percent());

    // Example 4: A document that breaks several rules
    println!("\n--- Example 4: Validation Violations ---");
    let mut broken = demo_document();
    broken["slug"] = json!("Not A Slug!");
    broken["tokenomics"]["allocations"][0]["percent"] = json!(90);
    broken["rounds"]["preSales"][0]["hardCap"] = json!("1");

    match service.validate_and_save(broken) {
        Ok(_) => println!("✗ Unexpectedly accepted"),
        Err(StoreError::Validation(error)) => {
            println!("✓ Rejected with {} violation(s):", error.violations.len());
            for violation in &error.violations {
                println!("  - {}", violation);
            }
        }
        Err(other) => return Err(other),
    }

    // Example 5: Error categories
    println!("\n--- Example 5: Error Categories ---");
    for slug in ["../etc", "missing-project"] {
        if let Err(e) = service.get_record(slug) {
            println!("  {:<16} -> {} ({}): {}", slug, e.code(), e.status_code(), e);
        }
    }

    // Example 6: Delete
    println!("\n--- Example 6: Delete ---");
    service.delete_record("atlas-chain")?;
    service.delete_record("atlas-chain")?;
    println!(
        "✓ Deleted, {} record(s) remain",
        service.list_summaries()?.len()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
