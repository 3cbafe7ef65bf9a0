//! Integration tests for the `yudo` binary.
//!
//! Every run points `YUDO_CONFIG` at a temporary file so the user's own
//! configuration never leaks in.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p yudo-cli --test cli
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

const DATASET: &str = r#"{
    "110000000000": "北京市",
    "110100000000": "市辖区",
    "110101000000": "东城区",
    "110101001000": "东华门街道",
    "110105000000": {"name": "朝阳区"}
}"#;

fn yudo(config: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_yudo"))
        .args(args)
        .env("YUDO_CONFIG", config)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start yudo");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn workspace() -> (TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let config = dir.path().join("yudo.toml");
    (dir, config)
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn gend_forced_prints_dates() {
    let (_dir, config) = workspace();
    let output = yudo(
        &config,
        &["gend", "-i", "2024.02.27~2024.03.01", "-F"],
        "",
    );
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["2024.02.27", "2024.02.28", "2024.02.29"]
    );
}

#[test]
fn gend_asks_before_printing() {
    let (_dir, config) = workspace();
    let args = ["gend", "-i", "2024.01.01~2024.01.03"];

    let declined = yudo(&config, &args, "n\n");
    assert!(declined.status.success());
    assert!(declined.stdout.is_empty());
    let prompt = String::from_utf8_lossy(&declined.stderr);
    assert!(prompt.contains("about 2 items, 20 Bytes of text, continue? (Y/[n])"));

    let accepted = yudo(&config, &args, "Y\n");
    assert_eq!(stdout_lines(&accepted), vec!["2024.01.01", "2024.01.02"]);
}

#[test]
fn empty_result_is_a_notice() {
    let (_dir, config) = workspace();
    let output = yudo(&config, &["gend", "-i", "2024.01.01", "-F"], "");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no data produced"));
}

#[test]
fn configured_format_is_used() {
    let (_dir, config) = workspace();
    let set = yudo(&config, &["conf", "gend.format=%Y%m%d"], "");
    assert!(set.status.success());

    let read = yudo(&config, &["conf", "gend.format"], "");
    assert_eq!(stdout_lines(&read), vec!["%Y%m%d"]);

    let output = yudo(&config, &["gend", "-i", "2024.01.01~2024.01.02", "-F"], "");
    assert_eq!(stdout_lines(&output), vec!["20240101"]);

    let removed = yudo(&config, &["disconf", "gend.format"], "Y\n");
    assert!(removed.status.success());
    let output = yudo(&config, &["gend", "-i", "2024.01.01~2024.01.02", "-F"], "");
    assert_eq!(stdout_lines(&output), vec!["2024.01.01"]);
}

#[test]
fn bad_range_is_a_usage_error() {
    let (_dir, config) = workspace();
    let output = yudo(&config, &["gend", "-o", "3q"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--offset"));
}

#[test]
fn bad_format_exits_with_one() {
    let (_dir, config) = workspace();
    let output = yudo(&config, &["gend", "-f", "%Q", "-i", "2024.01.01~2024.01.02"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error"));
}

#[test]
fn adc_lists_and_details() {
    let (dir, config) = workspace();
    let data = dir.path().join("codes.json");
    fs::write(&data, DATASET).unwrap();
    let data = data.to_str().unwrap();

    let output = yudo(&config, &["adc", "--data", data, "-n", "区", "--purify"], "");
    assert_eq!(
        stdout_lines(&output),
        vec!["110100000000", "110101000000", "110105000000"]
    );

    let output = yudo(&config, &["adc", "--data", data, "-d", "110101001"], "");
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("东城区(110101000000)"));
    assert!(text.contains("东华门街道(110101001000)"));
}

#[test]
fn idc_enumerates_with_checksums() {
    let (dir, config) = workspace();
    let data = dir.path().join("codes.json");
    fs::write(&data, DATASET).unwrap();

    let output = yudo(
        &config,
        &[
            "idc",
            "--data",
            data.to_str().unwrap(),
            "-u",
            "05",
            "-b",
            "1949.12.31~1950.01.01",
            "-s",
            "1~4",
            "-W",
            "-F",
        ],
        "",
    );
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["11010519491231002X"]);
}

#[test]
fn bit_and_char_shapes() {
    let (_dir, config) = workspace();
    let output = yudo(&config, &["bit", "MD5", "-q", "4"], "");
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l.len() == 32));

    let output = yudo(&config, &["char", "12", "-D", "-m", "5"], "");
    let lines = stdout_lines(&output);
    assert_eq!(
        lines.iter().map(String::len).collect::<Vec<_>>(),
        vec![5, 5, 2]
    );

    let output = yudo(&config, &["char", "12"], "");
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no charset selected"));
}

#[test]
fn product_of_files() {
    let (dir, config) = workspace();
    let left = dir.path().join("left.txt");
    let right = dir.path().join("right.txt");
    fs::write(&left, "a\nb\n").unwrap();
    fs::write(&right, "1\n2\n").unwrap();

    let output = yudo(
        &config,
        &[
            "product",
            left.to_str().unwrap(),
            right.to_str().unwrap(),
            "-f",
            "{0}={1}",
            "-F",
        ],
        "",
    );
    assert_eq!(stdout_lines(&output), vec!["a=1", "a=2", "b=1", "b=2"]);
}

#[test]
fn url_as_json() {
    let (_dir, config) = workspace();
    let output = yudo(&config, &["url", "--json"], "https://example.com/p?q=1&q=2\n");
    assert!(output.status.success());
    let parts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parts["scheme"], "https");
    assert_eq!(parts["path"], "/p");
    assert_eq!(parts["params"][0][1], serde_json::json!(["1", "2"]));
}
