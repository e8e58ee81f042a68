//! Integration tests for loading a catalog from disk.

use catalog::{CandidateTable, CatalogError};
use encoder::HashEmbedder;
use std::fs;
use std::path::PathBuf;

fn write_catalog(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("songscout-catalog-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_from_file() {
    let path = write_catalog(
        "ok.csv",
        "title,artist,mood\nSo What,Miles Davis,cool modal jazz\nDynamite,BTS,\"upbeat, disco pop\"\n",
    );

    let table = CandidateTable::load_from_file(&path, &HashEmbedder::new().with_dimensions(48)).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.dimension(), Some(48));
    assert_eq!(table.items()[1].mood, "upbeat, disco pop");
}

#[test]
fn test_missing_mood_column_fails_at_load() {
    let path = write_catalog("no_mood.csv", "title,artist\nSo What,Miles Davis\n");

    let err = CandidateTable::load_from_file(&path, &HashEmbedder::new()).unwrap_err();
    assert!(matches!(err, CatalogError::MissingColumn { .. }));
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("songscout-definitely-missing.csv");
    let err = CandidateTable::load_from_file(&path, &HashEmbedder::new()).unwrap_err();
    assert!(matches!(err, CatalogError::FileNotFound { .. }));
}
