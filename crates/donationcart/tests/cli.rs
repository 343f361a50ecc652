//! End-to-end runs of the `dcart` binary.

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

fn dcart(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dcart"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run dcart")
}

fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{contents}").expect("write temp file");
    file
}

fn path_of(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("utf-8 temp path")
}

// ═══════════════════════════════════════════════════════════════════════
// config validate
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn validate_accepts_good_file() {
    let good = file_with("[fees]\npercent_bps = 300\n");
    let output = dcart(&["config", "validate", "--file", path_of(&good)]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid."));
}

#[test]
fn validate_rejects_bad_file_with_failure_status() {
    let bad = file_with("[fees]\npercent_bps = 20000\n");
    let output = dcart(&["config", "validate", "--file", path_of(&bad)]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("percent_bps"));
}

#[test]
fn validate_ignores_broken_global_config() {
    let broken = file_with("[fees]\npercent_bps = \"lots\"\n");
    let good = file_with("[checkout]\nconfirmation_prefix = \"GIV\"\n");
    let output = dcart(&[
        "-c",
        path_of(&broken),
        "config",
        "validate",
        "--file",
        path_of(&good),
    ]);

    assert!(output.status.success());
}

#[test]
fn validate_falls_back_to_global_config() {
    let broken = file_with("[checkout]\nconfirmation_max = 0\n");
    let output = dcart(&["-c", path_of(&broken), "config", "validate"]);

    assert!(!output.status.success());
}

// ═══════════════════════════════════════════════════════════════════════
// totals
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn totals_json_reports_fee() {
    let session = file_with(
        r#"{"items": [{"id": "well", "amount": "50"}, {"id": "orphans", "amount": "25"}],
            "cover_fees": true}"#,
    );
    let output = dcart(&["totals", path_of(&session), "--json"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["totals"]["subtotal"], "75.00");
    assert_eq!(report["totals"]["processing_fee"], "2.48");
    assert_eq!(report["totals"]["total"], "77.48");
}

#[test]
fn totals_overflow_fails() {
    let session = file_with(
        r#"{"items": [{"id": "huge", "amount": "184467440737095516.05"}], "cover_fees": true}"#,
    );
    let output = dcart(&["totals", path_of(&session)]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("too large"));
}
