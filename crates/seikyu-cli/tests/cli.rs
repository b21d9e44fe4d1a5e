use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "\
領収書
株式会社サンプル商事
田中一郎様
発行日 2024年3月1日
小計 8,000円
合計 10,000円
お支払い 2024/03/10 14:30
";

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../seikyu-core/tests/fixtures/receipt_response.json")
}

/// A command isolated from any user configuration.
fn seikyu(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("seikyu").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("GOOGLE_VISION_API_KEY")
        .env_remove("GOOGLE_VISION_ACCESS_TOKEN");
    cmd
}

#[test]
fn extract_from_stdin_as_json() {
    let home = TempDir::new().unwrap();

    let output = seikyu(&home)
        .arg("extract")
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["date"], "2024年3月1日");
    assert_eq!(json["amount"], "¥10,000");
    assert_eq!(json["to"], "株式会社サンプル商事");
    assert_eq!(json["applicant"], "田中一郎様");
    assert_eq!(json["paymentDate"], "2024/03/10 14:30");
}

#[test]
fn extract_as_csv_with_empty_fields() {
    let home = TempDir::new().unwrap();

    seikyu(&home)
        .args(["extract", "--format", "csv"])
        .write_stdin("no invoice here")
        .assert()
        .success()
        .stdout("date,amount,to,applicant,paymentDate,issuer\n-,-,-,-,-,-\n");
}

#[test]
fn extract_lists_targets_in_text_mode() {
    let home = TempDir::new().unwrap();

    seikyu(&home)
        .args(["extract", "--format", "text", "--targets"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains("金額: ¥10,000"))
        .stdout(predicate::str::contains("  - 8,000円"))
        .stdout(predicate::str::contains("  - 10,000円"));
}

#[test]
fn extract_missing_file_fails() {
    let home = TempDir::new().unwrap();

    seikyu(&home)
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn scan_with_saved_response() {
    let home = TempDir::new().unwrap();
    let image = home.path().join("receipt.png");
    fs::write(&image, b"not decoded when a response is given").unwrap();

    let output = seikyu(&home)
        .arg("scan")
        .arg(&image)
        .arg("--response")
        .arg(fixture())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["fields"]["issuer"], "株式会社サンプル商事");
    assert_eq!(json["boxes"].as_array().unwrap().len(), 10);
    assert_eq!(json["metadata"]["source"], "receipt.png");
}

#[test]
fn scan_without_credentials_fails() {
    let home = TempDir::new().unwrap();
    let image = home.path().join("receipt.png");
    fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

    seikyu(&home)
        .arg("scan")
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No OCR credentials"));
}

#[test]
fn config_init_then_set_and_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("seikyu.json");
    let config_arg = config.to_str().unwrap();

    seikyu(&home)
        .args(["--config", config_arg, "config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    seikyu(&home)
        .args(["--config", config_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    seikyu(&home)
        .args(["--config", config_arg, "config", "set", "output.format", "csv"])
        .assert()
        .success();

    seikyu(&home)
        .args(["--config", config_arg, "config", "get", "output.format"])
        .assert()
        .success()
        .stdout("\"csv\"\n");

    // The configured format now applies to extract
    seikyu(&home)
        .args(["--config", config_arg, "extract"])
        .write_stdin("合計 500円")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("date,amount"));
}

#[test]
fn config_path_reports_missing_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("absent.json");

    seikyu(&home)
        .args(["--config", config.to_str().unwrap(), "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));
}
