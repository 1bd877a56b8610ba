use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_csv-consolidate"))
        .current_dir(dir)
        .output()
        .expect("run csv-consolidate")
}

#[test]
fn converts_data_dir_into_tx_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::copy(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data/accounts.csv"),
        dir.path().join("data/accounts.csv"),
    )
    .unwrap();

    let out = run_in(dir.path());

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim_end(), "Processing complete. Output saved to 'tx.json'.");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[convert][ok]"));

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("tx.json")).unwrap()).unwrap();
    assert_eq!(doc, serde_json::json!({ "accounts": ["A", "B", "C"] }));
}

#[test]
fn missing_data_dir_exits_cleanly_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");

    let out = run_in(dir.path());

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim_end(), "Error: 'data' directory not found.");
    assert!(!dir.path().join("tx.json").exists());
}

#[test]
fn unreadable_input_fails_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/good.csv"), "1\n").unwrap();
    fs::write(dir.path().join("data/zz_bad.csv"), b"\xff\xfe\n").unwrap();

    let out = run_in(dir.path());

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    let error_lines: Vec<&str> = stderr.lines().filter(|l| l.contains("err=")).collect();
    assert_eq!(error_lines.len(), 1);
    assert!(error_lines[0].contains("csv error"));
    assert_eq!(stderr.lines().filter(|l| l.contains("csv error")).count(), 1);
    assert!(out.stdout.is_empty());
    assert!(!dir.path().join("tx.json").exists());
}

#[cfg(unix)]
#[test]
fn critical_failure_is_logged_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/good.csv"), "1\n").unwrap();
    std::os::unix::fs::symlink(dir.path().join("data/nope"), dir.path().join("data/dangling.csv"))
        .unwrap();

    let out = run_in(dir.path());

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    let error_lines: Vec<&str> = stderr.lines().filter(|l| l.contains("io error")).collect();
    assert_eq!(error_lines.len(), 1);
    assert!(error_lines[0].starts_with("[ALERT][convert][Critical]"));
    assert!(!dir.path().join("tx.json").exists());
}
