//! End-to-end tests for `bpetrain train`.

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn bpetrain() -> Command {
    let mut cmd = Command::cargo_bin("bpetrain").unwrap();
    cmd.arg("-q");
    cmd
}

fn corpus(dir: &TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("corpus.txt");
    fs::write(&path, text).unwrap();
    path
}

fn lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_train_writes_one_symbol_per_line() {
    let dir = TempDir::new().unwrap();
    let input = corpus(&dir, "aaab\n");
    let output = dir.path().join("vocab.txt");

    bpetrain()
        .args(["train", "--no-progress", "-n", "2", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(lines(&output), vec!["aa", "ab"]);
}

#[test]
fn test_train_reads_gzip_corpus() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("corpus.txt.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&input).unwrap(), Compression::default());
    encoder.write_all(b"aaab\n").unwrap();
    encoder.finish().unwrap();
    let output = dir.path().join("vocab.txt");

    bpetrain()
        .args(["train", "--no-progress", "-n", "2", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(lines(&output), vec!["aa", "ab"]);
}

#[test]
fn test_train_stops_when_pairs_run_out() {
    let dir = TempDir::new().unwrap();
    let input = corpus(&dir, "ab ab ab\nba ba\n");
    let output = dir.path().join("vocab.txt");
    let summary = dir.path().join("summary.json");

    bpetrain()
        .args(["train", "--no-progress", "-n", "100", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success();

    let learned = lines(&output);
    assert_eq!(learned.first().map(String::as_str), Some("ab"));
    assert!(learned.len() < 100);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(report["merges_requested"], 100);
    assert_eq!(report["merges_performed"], learned.len());
    assert_eq!(report["distinct_words"], 2);
    assert_eq!(report["total_words"], 5);
    assert_eq!(report["stop_reason"], "no pairs left");
}

#[test]
fn test_stdin_to_stdout_with_alphabet() {
    bpetrain()
        .args(["train", "--no-progress", "-n", "1", "--with-alphabet", "-i", "-", "-o", "-"])
        .write_stdin("lo lo\n")
        .assert()
        .success()
        .stdout("l\no\n§\nlo\n");
}

#[test]
fn test_preprocessing_flags() {
    let dir = TempDir::new().unwrap();
    let input = corpus(&dir, "Hi, hi! HI\n");
    let output = dir.path().join("vocab.txt");
    let summary = dir.path().join("summary.json");

    bpetrain()
        .args(["train", "--no-progress", "-n", "1", "--lowercase", "--strip-punctuation", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(report["distinct_words"], 1);
    assert_eq!(lines(&output), vec!["hi"]);
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    bpetrain()
        .args(["train", "--no-progress", "-i"])
        .arg(dir.path().join("nope.txt"))
        .arg("-o")
        .arg(dir.path().join("vocab.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read corpus"));
}

#[test]
fn test_invalid_fraction_fails() {
    let dir = TempDir::new().unwrap();
    let input = corpus(&dir, "abc\n");

    bpetrain()
        .args(["train", "--no-progress", "--fraction", "1.5", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("vocab.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("fraction"));
}

#[test]
fn test_unknown_selection_rejected() {
    bpetrain()
        .args(["train", "-i", "-", "-o", "-", "--selection", "fastest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("heap or scan"));
}
