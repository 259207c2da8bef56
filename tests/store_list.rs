// tests/store_list.rs

use std::fs;

use store_scrape::error::ShardError;
use store_scrape::store;

#[test]
fn load_normalizes_slug_and_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stores.json");
    fs::write(
        &path,
        r#"[
            { "storeId": "7004", "name": "Ottawa West", "city": "Ottawa", "province": "ON" },
            { "store_number": "7108", "name": "Montréal Marché Central", "city": "Montréal", "province": "QC" },
            { "storeId": "9999" }
        ]"#,
    )
    .unwrap();

    let stores = store::load_list(&path).unwrap();
    assert_eq!(stores.len(), 3);

    assert_eq!(stores[0].store_number, "7004");
    assert_eq!(stores[0].slug.as_deref(), Some("7004-ottawa-on"));
    assert_eq!(
        stores[0].url.as_deref(),
        Some("https://www.homedepot.ca/store-details/7004")
    );

    // Non-ASCII collapses to dashes, never panics.
    assert_eq!(stores[1].slug.as_deref(), Some("7108-montr-al-qc"));

    // Bare record: slug falls back to the ID alone.
    assert_eq!(stores[2].slug.as_deref(), Some("9999"));
}

#[test]
fn order_of_the_listed_file_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stores.json");
    fs::write(
        &path,
        r#"[ {"storeId":"3"}, {"storeId":"1"}, {"storeId":"2"} ]"#,
    )
    .unwrap();

    let ids: Vec<String> = store::load_list(&path)
        .unwrap()
        .into_iter()
        .map(|s| s.store_number)
        .collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
}

#[test]
fn missing_file_is_a_persistence_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = store::load_list(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ShardError::Persistence(_)));
}

#[test]
fn corrupt_json_is_reported_as_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stores.json");
    fs::write(&path, "[{").unwrap();
    let err = store::load_list(&path).unwrap_err();
    assert!(matches!(err, ShardError::Malformed(_)));
}

#[test]
fn store_label_prefers_location_over_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stores.json");
    fs::write(
        &path,
        r#"[
            { "storeId": "7004", "name": "Ottawa West", "city": "Ottawa", "province": "ON" },
            { "storeId": "7005", "name": "Somewhere" }
        ]"#,
    )
    .unwrap();

    let stores = store::load_list(&path).unwrap();
    assert_eq!(stores[0].label(), "[STORE 7004] Ottawa, ON");
    assert_eq!(stores[1].label(), "[STORE 7005] Somewhere");
}
