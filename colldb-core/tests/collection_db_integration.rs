//! File-backed load, save and merge tests.

use colldb_core::{Collection, CollectionDb, CollectionError};

fn favourites() -> CollectionDb {
    let mut db = CollectionDb::new(20_240_101);
    db.push(Collection::with_fingerprints(
        "Favourites",
        [
            "d41d8cd98f00b204e9800998ecf8427e",
            "9e107d9d372bb6826bd81d3542a419d6",
        ],
    ));
    db.push(Collection::with_fingerprints(
        "Stream maps ★",
        ["e4d909c290d0fb1ca068ffaddf22cbd0"],
    ));
    db
}

fn tournament() -> CollectionDb {
    let mut db = CollectionDb::new(20_250_101);
    for round in ["RO32", "RO16", "QF"] {
        db.push(Collection::with_fingerprints(
            round,
            [format!("{:0>32}", round.to_lowercase())],
        ));
    }
    db
}

#[test]
fn test_save_then_open() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("collection.db");

    let db = favourites();
    db.save(&path).expect("save");
    let loaded = CollectionDb::open(&path).expect("open");

    assert_eq!(loaded, db);
    assert_eq!(std::fs::read(&path).expect("read"), db.to_bytes().expect("encode"));
}

#[test]
fn test_merge_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("first.db");
    let second = dir.path().join("second.db");
    let merged_path = dir.path().join("merged_collection.db");

    favourites().save(&first).expect("save first");
    tournament().save(&second).expect("save second");

    let a = CollectionDb::open(&first).expect("open first");
    let b = CollectionDb::open(&second).expect("open second");
    CollectionDb::merge(&a, &b)
        .save(&merged_path)
        .expect("save merged");

    let merged = CollectionDb::open(&merged_path).expect("open merged");
    assert_eq!(merged.format_version, 20_240_101);
    assert_eq!(merged.collection_count(), 5);
    let names: Vec<_> = merged.iter().map(|c| c.name.clone()).collect();
    assert_eq!(
        names,
        ["Favourites", "Stream maps ★", "RO32", "RO16", "QF"]
    );
    assert_eq!(merged.fingerprint_total(), 6);
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = CollectionDb::open(dir.path().join("nope.db")).unwrap_err();
    assert!(matches!(err, CollectionError::Io { .. }));
    assert!(err.to_string().contains("nope.db"));
}

#[test]
fn test_open_empty_collection_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.db");
    CollectionDb::new(1).save(&path).expect("save");

    let err = CollectionDb::open(&path).unwrap_err();
    assert!(matches!(err, CollectionError::EmptyCollectionFile));
}

#[test]
fn test_open_truncated_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("truncated.db");
    let bytes = favourites().to_bytes().expect("encode");
    std::fs::write(&path, &bytes[..bytes.len() - 5]).expect("write");

    let err = CollectionDb::open(&path).unwrap_err();
    assert!(err.is_truncation());
}
