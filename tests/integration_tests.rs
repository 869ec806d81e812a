// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the project service over the filesystem backend.
//!
//! These tests walk the full path a request handler takes: raw document in,
//! validation, persistence, listing, reading and deletion.

mod common;

use common::{filesystem_service, named, with_allocations};
use sale_factory::domain::demo::demo_document;
use sale_factory::domain::{ConfigValidator, ErrorKind, ProjectService, StoreError};
use sale_factory::service::RECORD_FILE;
use serde_json::json;
use std::fs;

#[test]
fn test_allocations_under_100_are_accepted() {
    let result = ConfigValidator::validate(&with_allocations(&[45.0, 20.0, 15.0, 10.0]));
    assert!(result.is_ok());
}

#[test]
fn test_allocations_over_100_are_rejected() {
    let error = ConfigValidator::validate(&with_allocations(&[60.0, 50.0])).unwrap_err();
    assert_eq!(error.violations.len(), 1);
    assert_eq!(error.violations[0].field(), Some("allocations"));
}

#[test]
fn test_round_ending_before_start_is_rejected() {
    let mut doc = demo_document();
    doc["rounds"]["preSales"][0]["start"] = json!("2024-05-20T00:00:00.000Z");
    doc["rounds"]["preSales"][0]["end"] = json!("2024-05-01T00:00:00.000Z");

    let error = ConfigValidator::validate(&doc).unwrap_err();
    assert_eq!(error.violations[0].field(), Some("start"));
}

#[test]
fn test_invalid_slug_is_rejected_by_store() {
    let (_temp, service) = filesystem_service();
    let err = service.get_record("My Project!").unwrap_err();
    assert!(matches!(err, StoreError::InvalidIdentifier(_)));
    assert_eq!(err.code(), "INVALID_SLUG");
}

#[test]
fn test_saved_record_is_listed() {
    let (_temp, service) = filesystem_service();
    let saved = service.validate_and_save(demo_document()).unwrap();

    let summaries = service.list_summaries().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].slug.as_str(), "atlas-chain");
    assert_eq!(summaries[0].name, "Atlas Chain");
    assert_eq!(Some(&summaries[0].updated_at), saved.updated_at.as_ref());

    let json = serde_json::to_value(&summaries[0]).unwrap();
    assert_eq!(json["slug"], "atlas-chain");
    assert!(json.get("updatedAt").is_some());
}

#[test]
fn test_deleted_record_is_not_found() {
    let (temp, service) = filesystem_service();
    service.validate_and_save(demo_document()).unwrap();

    service.delete_record("atlas-chain").unwrap();

    let err = service.get_record("atlas-chain").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status_code(), 404);
    assert!(!temp.path().join("atlas-chain").exists());
}

#[test]
fn test_delete_never_written_slug() {
    let (_temp, service) = filesystem_service();
    service.delete_record("never-written").unwrap();
    assert_eq!(
        service.get_record("never-written").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_save_with_mixed_case_slug_and_ticker() {
    let (temp, service) = filesystem_service();
    let mut doc = demo_document();
    doc["slug"] = json!("Atlas-Chain");
    doc["ticker"] = json!("atl");

    let saved = service.validate_and_save(doc).unwrap();
    assert_eq!(saved.slug.as_str(), "atlas-chain");
    assert_eq!(saved.ticker, "ATL");
    assert!(temp.path().join("atlas-chain").join(RECORD_FILE).is_file());
}

#[test]
fn test_resave_refreshes_updated_at_and_keeps_created_at() {
    let (_temp, service) = filesystem_service();
    let mut doc = demo_document();
    doc.as_object_mut().unwrap().remove("createdAt");

    let first = service.validate_and_save(doc.clone()).unwrap();
    let created_at = first.created_at.clone().unwrap();

    doc["createdAt"] = json!(created_at);
    doc["name"] = json!("Atlas Chain v2");
    let second = service.validate_and_save(doc).unwrap();

    assert_eq!(second.created_at.as_deref(), Some(created_at.as_str()));
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(service.get_record("atlas-chain").unwrap()["name"], "Atlas Chain v2");
}

#[test]
fn test_validation_failure_writes_nothing() {
    let (temp, service) = filesystem_service();
    let mut doc = demo_document();
    doc["slug"] = json!("../escape");
    doc["tokenomics"]["totalSupply"] = json!("0");

    let err = service.validate_and_save(doc).unwrap_err();
    let StoreError::Validation(validation) = err else {
        panic!("expected validation error");
    };
    assert!(validation.has_violation_at("slug"));
    assert!(validation.has_violation_at("totalSupply"));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_list_survives_foreign_and_corrupt_entries() {
    let (temp, service) = filesystem_service();
    service.validate_and_save(demo_document()).unwrap();
    service.validate_and_save(named("nova", "Nova")).unwrap();

    fs::create_dir(temp.path().join("empty-dir")).unwrap();
    fs::create_dir(temp.path().join("corrupt")).unwrap();
    fs::write(temp.path().join("corrupt").join(RECORD_FILE), "{ nope").unwrap();
    fs::create_dir(temp.path().join("Has Spaces")).unwrap();
    fs::write(temp.path().join("loose-file.json"), "{}").unwrap();

    let mut slugs: Vec<String> = service
        .list_summaries()
        .unwrap()
        .into_iter()
        .map(|s| s.slug.into_string())
        .collect();
    slugs.sort();
    assert_eq!(slugs, vec!["atlas-chain", "nova"]);
}

#[test]
fn test_read_returns_stored_record_without_revalidation() {
    let (temp, service) = filesystem_service();
    service.validate_and_save(demo_document()).unwrap();

    let path = temp.path().join("atlas-chain").join(RECORD_FILE);
    let mut stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    stored["tokenomics"]["totalSupply"] = json!("0");
    fs::write(&path, serde_json::to_string_pretty(&stored).unwrap()).unwrap();

    let record = service.get_record("atlas-chain").unwrap();
    assert_eq!(record["tokenomics"]["totalSupply"], "0");
}

#[test]
fn test_record_missing_links_is_still_listed_and_readable() {
    let (temp, service) = filesystem_service();
    service.validate_and_save(demo_document()).unwrap();

    let path = temp.path().join("atlas-chain").join(RECORD_FILE);
    let mut stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    stored.as_object_mut().unwrap().remove("links");
    fs::write(&path, serde_json::to_string_pretty(&stored).unwrap()).unwrap();

    let summaries = service.list_summaries().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].slug.as_str(), "atlas-chain");

    let record = service.get_record("atlas-chain").unwrap();
    assert!(record.get("links").is_none());
    assert_eq!(record, stored);
}

#[test]
fn test_corrupt_record_read_is_io_error() {
    let (temp, service) = filesystem_service();
    fs::create_dir(temp.path().join("broken")).unwrap();
    fs::write(temp.path().join("broken").join(RECORD_FILE), "not json").unwrap();

    let err = service.get_record("broken").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.status_code(), 500);
}
