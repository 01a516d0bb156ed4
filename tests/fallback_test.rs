use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

fn submission_file() -> tempfile::NamedTempFile {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        input,
        r#"{{"clientId":"client-123","clientSecret":"secret-abc","amount":100.00,"cardNumber":"4242424242424242","cvv":"123","expiryDate":"12/28","idempotencyKey":"key-1"}}"#
    )
    .unwrap();
    input
}

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let input = submission_file();

    let mut cmd = Command::new(cargo_bin!("payproxy"));
    cmd.arg(input.path()).arg("--db-path").arg("some_db");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let input = submission_file();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("payproxy"));
    cmd.arg(input.path()).arg("--db-path").arg(&db_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING").not());
}
