#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use rust_decimal_macros::dec;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: field wins on a 2.
    let input1 = common::rounds_file(&[r#"{"session": "p1", "bets": {"field": 10}}"#]).unwrap();
    let output1 = Command::new(cargo_bin!("dicepay"))
        .arg("play")
        .arg(input1.path())
        .args(["--roll", "1,1"])
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output1.status.success());
    let reports1 = common::reports(&output1.stdout);
    assert_eq!(common::amount(&reports1[0]["newBalance"]), dec!(520));

    // 2. Second run on the same database picks the balance back up.
    let input2 = common::rounds_file(&[r#"{"session": "p1", "bets": {"seven": 10}}"#]).unwrap();
    let output2 = Command::new(cargo_bin!("dicepay"))
        .arg("play")
        .arg(input2.path())
        .args(["--roll", "3,4"])
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output2.status.success());
    let reports2 = common::reports(&output2.stdout);
    assert_eq!(common::amount(&reports2[0]["newBalance"]), dec!(562));

    // 3. Stats reflect the last round.
    let stats = Command::new(cargo_bin!("dicepay"))
        .arg("stats")
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(stats.status.success());
    let stdout = String::from_utf8_lossy(&stats.stdout);
    assert!(stdout.contains("session,balance,lastBetTotal,lastWinAmount"));
    assert!(stdout.contains("p1,562,10,42"));
}
