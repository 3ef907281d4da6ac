//! Integration tests for the meetric CLI.
//!
//! Each test runs the compiled binary against a throwaway home directory so
//! config and history writes never touch the real user profile.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const SAMPLE_CSV: &str = "timestamp,speaker,text\n\
                          00:00,PM,Let's decide the sprint plan\n\
                          00:05,Eng1,\"I need to fix the login bug, it's critical\"\n\
                          00:10,QA,Is this tested? issue with timeouts\n";

fn meetric(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_meetric"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"));
    cmd
}

fn write_sample(home: &TempDir) -> PathBuf {
    let path = home.path().join("standup.csv");
    std::fs::write(&path, SAMPLE_CSV).unwrap();
    path
}

#[test]
fn test_version_command() {
    let home = TempDir::new().unwrap();
    let output = meetric(&home)
        .arg("version")
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Meetric"), "Unexpected output: {}", stdout);
}

#[test]
fn test_analyze_renders_report() {
    let home = TempDir::new().unwrap();
    let transcript = write_sample(&home);

    let output = meetric(&home)
        .args(["analyze", transcript.to_str().unwrap(), "--no-save"])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Meeting Analysis: standup.csv"));
    assert!(stdout.contains("Duration: 10 min | Speakers: 3 | Messages: 3"));
    assert!(stdout.contains("Action Items"));
    assert!(stdout.contains("Follow-up Reminders"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Saved"), "Run was saved despite --no-save");
}

#[test]
fn test_analyze_json_output_is_parseable() {
    let home = TempDir::new().unwrap();
    let transcript = write_sample(&home);

    let output = meetric(&home)
        .args(["analyze", transcript.to_str().unwrap(), "--json", "--no-save"])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let bundle: serde_json::Value = serde_json::from_slice(&output.stdout)
        .expect("stdout is not valid JSON");

    assert!(bundle["actionItems"].is_array());
    assert_eq!(bundle["meetingStats"]["duration"], 10);
    assert_eq!(bundle["actionItems"][0]["id"], "action-0");
}

#[test]
fn test_analyze_writes_output_file() {
    let home = TempDir::new().unwrap();
    let transcript = write_sample(&home);
    let report_path = home.path().join("report.txt");

    let output = meetric(&home)
        .args([
            "analyze",
            transcript.to_str().unwrap(),
            "-o",
            report_path.to_str().unwrap(),
            "--no-save",
        ])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wrote analysis to"));

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("Meeting Analysis"));
}

#[test]
fn test_analyze_saves_and_history_lists_run() {
    let home = TempDir::new().unwrap();
    let transcript = write_sample(&home);

    let output = meetric(&home)
        .args([
            "analyze",
            transcript.to_str().unwrap(),
            "--title",
            "Sprint 19 standup",
        ])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Saved as analysis #1"),
        "Expected save notice, got: {}",
        stderr
    );

    let output = meetric(&home)
        .arg("history")
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 1 analysis run(s):"));
    assert!(stdout.contains("Sprint 19 standup"));
    assert!(stdout.contains("[standup.csv]"));

    let output = meetric(&home)
        .args(["show", "1"])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Meeting Analysis: Sprint 19 standup"));
}

#[test]
fn test_history_empty_database() {
    let home = TempDir::new().unwrap();
    let output = meetric(&home)
        .arg("history")
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No analyses found matching your criteria."));
}

#[test]
fn test_show_unknown_id_fails() {
    let home = TempDir::new().unwrap();
    let output = meetric(&home)
        .args(["show", "42"])
        .output()
        .expect("Failed to run command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Analysis with ID 42 not found"),
        "Expected not-found error, got: {}",
        stderr
    );
}

#[test]
fn test_analyze_missing_file() {
    let home = TempDir::new().unwrap();
    let output = meetric(&home)
        .args(["analyze", "nonexistent.csv", "--no-save"])
        .output()
        .expect("Failed to run command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to read transcript file"),
        "Expected read error, got: {}",
        stderr
    );
}

#[test]
fn test_analyze_rejects_missing_columns() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("broken.csv");
    std::fs::write(&path, "when,who,said\n00:00,PM,hello\n").unwrap();

    let output = meetric(&home)
        .args(["analyze", path.to_str().unwrap(), "--no-save"])
        .output()
        .expect("Failed to run command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("missing required columns"),
        "Expected missing-columns error, got: {}",
        stderr
    );
}
