//! Integration tests for the `process` command.

use std::process::Command;

fn binary() -> &'static str {
    env!("CARGO_BIN_EXE_docparts")
}

#[test]
fn test_process_command_help() {
    let output = Command::new(binary())
        .args(["process", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--strategy"));
    assert!(stdout.contains("--pretty"));
    assert!(stdout.contains("--chunk-size"));
}

#[test]
fn test_process_text_file_outputs_json() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "Meeting Notes\n\nWe discussed the roadmap.").expect("write failed");

    let output = Command::new(binary())
        .args(["process"])
        .arg(&path)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["processing_info"][0]["filename"], "notes.txt");
    assert_eq!(value["processing_info"][0]["status"], "success");
    assert_eq!(value["summary"]["files_processed"], 1);
}

#[test]
fn test_process_failing_file_exits_nonzero() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("garbage.bin");
    std::fs::write(&path, [0x00u8, 0xFF, 0x80, 0x99]).expect("write failed");

    let output = Command::new(binary())
        .args(["process"])
        .arg(&path)
        .output()
        .expect("Failed to execute command");

    // The batch still produces JSON, but the exit code reflects the failure.
    assert!(!output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["processing_info"][0]["status"], "error");
    assert_eq!(value["processing_info"][0]["file_type"], "unknown");
}

#[test]
fn test_process_missing_file_fails() {
    let output = Command::new(binary())
        .args(["process", "/nonexistent/file.txt"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"));
}
