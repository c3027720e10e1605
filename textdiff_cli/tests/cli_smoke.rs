use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_file_path(prefix: &str) -> PathBuf {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("textdiff-{prefix}-{nonce}.txt"))
}

fn write_temp(prefix: &str, contents: &[u8]) -> PathBuf {
    let path = temp_file_path(prefix);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn text_diff(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_text-diff"))
        .args(args)
        .output()
        .expect("run text-diff")
}

#[test]
fn text_diff_prints_unified_diff_for_two_files() {
    let left = write_temp("left-unified", b"aaa\nbbb\nccc\n");
    let right = write_temp("right-unified", b"aaa\nxxx\nccc\n");

    let output = text_diff(&[left.as_os_str(), right.as_os_str()]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "@@ -1,3 +1,3 @@\n aaa\n-bbb\n+xxx\n ccc\n"
    );
}

#[test]
fn text_diff_accepts_file_and_literal_string() {
    let left = write_temp("left-literal", b"aaa\nbbb\nccc\n");

    let output = text_diff(&[left.as_os_str(), "aaa\nxxx\nccc\n".as_ref()]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "@@ -1,3 +1,3 @@\n aaa\n-bbb\n+xxx\n ccc\n"
    );
}

#[test]
fn text_diff_prints_nothing_for_identical_inputs() {
    let left = write_temp("same", b"aaa\nbbb\nccc\n");

    let output = text_diff(&[left.as_os_str(), left.as_os_str()]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn text_diff_honours_format_and_context_flags() {
    let output = text_diff(&[
        "--format".as_ref(),
        "old".as_ref(),
        "--context-lines".as_ref(),
        "0".as_ref(),
        "aaa\nbbb\nccc\n".as_ref(),
        "aaa\nxxx\nccc\n".as_ref(),
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "<bbb\n>xxx\n");
}

#[test]
fn text_diff_reads_json_config() {
    let config = write_temp("config", br#"{"format": "generic", "context_lines": 1}"#);

    let output = text_diff(&[
        "--config".as_ref(),
        config.as_os_str(),
        "aaa\nbbb\nccc\nddd\n".as_ref(),
        "aaa\nxxx\nccc\nddd\n".as_ref(),
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), " aaa\n*bbb\n*xxx\n ccc\n");
}

#[test]
fn text_diff_flags_override_config_with_unknown_format() {
    let config = write_temp("config-unknown", br#"{"format": "context", "context_lines": 3}"#);

    let output = text_diff(&[
        "--config".as_ref(),
        config.as_os_str(),
        "--context-lines".as_ref(),
        "0".as_ref(),
        "aaa\nbbb\nccc\n".as_ref(),
        "aaa\nxxx\nccc\n".as_ref(),
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "*bbb\n*xxx\n");
}

#[test]
fn text_diff_emits_json() {
    let output = text_diff(&[
        "--json".as_ref(),
        "aaa\nbbb\n".as_ref(),
        "aaa\nccc\n".as_ref(),
    ]);

    assert!(output.status.success());
    let diff_json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid diff json");
    assert_eq!(diff_json["has_changes"], true);
    assert_eq!(diff_json["stats"]["hunks"], 1);
}

#[test]
fn text_diff_prints_summary_report() {
    let output = text_diff(&[
        "--summary".as_ref(),
        "aaa\nbbb\n".as_ref(),
        "aaa\nccc\n".as_ref(),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Text Diff Report"));
    assert!(stdout.contains("- Hunks: 1"));
}

#[test]
fn text_diff_logs_status_when_verbose() {
    let left = write_temp("left-verbose", b"aaa\n");
    let right = write_temp("right-verbose", b"bbb\n");

    let output = text_diff(&["--verbose".as_ref(), left.as_os_str(), right.as_os_str()]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("diff"));
    assert!(stderr.contains(&format!("{} - {}", left.display(), right.display())));
}

#[test]
fn text_diff_noop_skips_output() {
    let output = text_diff(&["--noop".as_ref(), "aaa\n".as_ref(), "bbb\n".as_ref()]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn text_diff_refuses_oversized_input() {
    let left = write_temp("left-large", b"aaa\nbbb\nccc\n");
    let right = write_temp("right-large", b"aaa\nxxx\nccc\n");

    let output = text_diff(&[
        "--threshold".as_ref(),
        "10".as_ref(),
        left.as_os_str(),
        right.as_os_str(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds 10 bytes, diff output suppressed"));
}

#[test]
fn text_diff_refuses_binary_input() {
    let left = write_temp("left-binary", b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");
    let right = write_temp("right-binary", b"aaa\n");

    let output = text_diff(&[left.as_os_str(), right.as_os_str()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is binary, diff output suppressed"));
}
